use crate::scalar::Scalar;
use crate::{LineSegment, Point};

/// A 2d triangle defined by three points `a`, `b` and `c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle<S> {
    pub a: Point<S>,
    pub b: Point<S>,
    pub c: Point<S>,
}

impl<S: Scalar> Triangle<S> {
    #[inline]
    pub fn ab(&self) -> LineSegment<S> {
        LineSegment {
            from: self.a,
            to: self.b,
        }
    }

    #[inline]
    pub fn bc(&self) -> LineSegment<S> {
        LineSegment {
            from: self.b,
            to: self.c,
        }
    }

    #[inline]
    pub fn ca(&self) -> LineSegment<S> {
        LineSegment {
            from: self.c,
            to: self.a,
        }
    }

    /// Twice the signed area of the triangle (positive when `a`, `b`, `c` wind
    /// counter-clockwise in y-up coordinates).
    #[inline]
    pub fn double_signed_area(&self) -> S {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// The (unsigned) area of the triangle.
    #[inline]
    pub fn area(&self) -> S {
        S::abs(self.double_signed_area()) * S::HALF
    }

    /// Returns true if the point is strictly inside the triangle.
    pub fn contains_point(&self, point: Point<S>) -> bool {
        let s1 = (self.b - self.a).cross(point - self.a);
        let s2 = (self.c - self.b).cross(point - self.b);
        let s3 = (self.a - self.c).cross(point - self.c);
        (s1 > S::ZERO && s2 > S::ZERO && s3 > S::ZERO)
            || (s1 < S::ZERO && s2 < S::ZERO && s3 < S::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point;

    #[test]
    fn area() {
        let t = Triangle {
            a: point(0.0f32, 0.0),
            b: point(10.0, 0.0),
            c: point(0.0, 10.0),
        };
        assert_eq!(t.area(), 50.0);
        assert_eq!(t.double_signed_area(), 100.0);

        let flipped = Triangle {
            a: t.a,
            b: t.c,
            c: t.b,
        };
        assert_eq!(flipped.double_signed_area(), -100.0);
        assert_eq!(flipped.area(), 50.0);
    }

    #[test]
    fn contains_point() {
        let t = Triangle {
            a: point(0.0f32, 0.0),
            b: point(10.0, 0.0),
            c: point(0.0, 10.0),
        };
        assert!(t.contains_point(point(2.0, 2.0)));
        assert!(!t.contains_point(point(8.0, 8.0)));
        assert!(!t.contains_point(point(-1.0, 2.0)));

        // Winding should not matter.
        let flipped = Triangle {
            a: t.a,
            b: t.c,
            c: t.b,
        };
        assert!(flipped.contains_point(point(2.0, 2.0)));
    }
}
