use crate::scalar::Scalar;
use crate::{Point, Vector};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        (self.ctrl - self.from) * S::TWO * (S::ONE - t) + (self.to - self.ctrl) * S::TWO * t
    }

    /// Return the sub-curve after the provided split point.
    pub fn after_split(&self, t: S) -> QuadraticBezierSegment<S> {
        let ctrl = self.ctrl.lerp(self.to, t);
        QuadraticBezierSegment {
            from: self.sample(t),
            ctrl,
            to: self.to,
        }
    }

    /// Find the interval of the beginning of the curve that can be approximated with a
    /// line segment without deviating from the curve by more than `tolerance`.
    pub fn flattening_step(&self, tolerance: S) -> S {
        let v1 = self.ctrl - self.from;
        let v2 = self.to - self.from;

        let v1_cross_v2 = v2.cross(v1);
        let h = v1.x.hypot(v1.y);

        if S::abs(v1_cross_v2 * h) <= S::value(0.000001) {
            return S::ONE;
        }

        let s2inv = h / v1_cross_v2;

        let t = S::TWO * S::sqrt(tolerance * S::abs(s2inv) / S::THREE);

        if t > S::ONE {
            return S::ONE;
        }

        t
    }

    /// Approximates the curve with sequence of line segments, invoking the
    /// callback at each step.
    ///
    /// The `tolerance` parameter defines the maximum distance between the
    /// curve and its approximation. The end of each step is provided,
    /// starting *after* `from` and finishing with `to`.
    pub fn for_each_flattened<F: FnMut(Point<S>)>(&self, tolerance: S, callback: &mut F) {
        let mut iter = *self;
        loop {
            let t = iter.flattening_step(tolerance);
            if t >= S::ONE {
                callback(iter.to);
                break;
            }
            iter = iter.after_split(t);
            callback(iter.from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point;

    #[test]
    fn flattening_stays_within_tolerance() {
        let curve = QuadraticBezierSegment {
            from: point(0.0f32, 0.0),
            ctrl: point(5.0, 10.0),
            to: point(10.0, 0.0),
        };

        for tolerance in &[0.5, 0.1, 0.01] {
            let mut from = curve.from;
            curve.for_each_flattened(*tolerance, &mut |to| {
                // Check a few points between from and to against the curve.
                let seg = crate::LineSegment { from, to };
                for i in 1..10 {
                    let p = seg.sample(i as f32 / 10.0);
                    let mut min_dist = f32::MAX;
                    for j in 0..=100 {
                        let q = curve.sample(j as f32 / 100.0);
                        min_dist = min_dist.min((p - q).length());
                    }
                    assert!(min_dist <= *tolerance * 1.2);
                }
                from = to;
            });
            assert_eq!(from, curve.to);
        }
    }

    #[test]
    fn flattening_a_line_is_one_segment() {
        let curve = QuadraticBezierSegment {
            from: point(0.0f32, 0.0),
            ctrl: point(5.0, 5.0),
            to: point(10.0, 10.0),
        };

        let mut count = 0;
        curve.for_each_flattened(0.01, &mut |_| {
            count += 1;
        });
        assert_eq!(count, 1);
    }
}
