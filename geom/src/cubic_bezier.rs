use crate::scalar::Scalar;
use crate::{Point, QuadraticBezierSegment, Vector};

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:²
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl1 - self.from) * S::THREE * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * S::SIX * one_t * t
            + (self.to - self.ctrl2) * S::THREE * t * t
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);

        let d = QuadraticBezierSegment {
            from: (self.ctrl1 - self.from).to_point(),
            ctrl: (self.ctrl2 - self.ctrl1).to_point(),
            to: (self.to - self.ctrl2).to_point(),
        };

        let dt = t1 - t0;
        let ctrl1 = from + d.sample(t0).to_vector() * dt;
        let ctrl2 = to - d.sample(t1).to_vector() * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Approximate the curve with a single quadratic bézier segment.
    ///
    /// This is terrible as a general approximation but works well enough when
    /// the sub-curve is the result of subdividing the cubic according to
    /// `num_quadratics`.
    fn to_quadratic(&self) -> QuadraticBezierSegment<S> {
        let c1 = (self.ctrl1 * S::THREE - self.from.to_vector()) * S::HALF;
        let c2 = (self.ctrl2 * S::THREE - self.to.to_vector()) * S::HALF;
        QuadraticBezierSegment {
            from: self.from,
            ctrl: (c1 + c2.to_vector()) * S::HALF,
            to: self.to,
        }
    }

    /// Computes the number of quadratic bézier segments required to approximate
    /// this cubic curve within the given tolerance.
    ///
    /// Derived by Raph Levien from section 10.6 of Sedeberg's CAGD notes
    /// <https://scholarsarchive.byu.edu/cgi/viewcontent.cgi?article=1000&context=facpub#section.10.6>
    /// and the error metric from the caffein owl blog post
    /// <http://caffeineowl.com/graphics/2d/vectorial/cubic2quad01.html>
    fn num_quadratics(&self, tolerance: S) -> S {
        debug_assert!(tolerance > S::ZERO);

        let x = self.from.x - S::THREE * self.ctrl1.x + S::THREE * self.ctrl2.x - self.to.x;
        let y = self.from.y - S::THREE * self.ctrl1.y + S::THREE * self.ctrl2.y - self.to.y;

        let err = x * x + y * y;

        S::powf(err / (S::value(432.0) * tolerance * tolerance), S::ONE / S::SIX)
            .ceil()
            .max(S::ONE)
    }

    /// Approximates the curve with sequence of line segments, invoking the
    /// callback at the end of each step.
    ///
    /// The `tolerance` parameter defines the maximum distance between the
    /// curve and its approximation. The callback is invoked starting *after*
    /// `from`, and is guaranteed to finish at `to` exactly.
    pub fn for_each_flattened<F: FnMut(Point<S>)>(&self, tolerance: S, callback: &mut F) {
        let quadratics_tolerance = tolerance * S::value(0.2);
        let flattening_tolerance = tolerance * S::value(0.8);

        let num_quadratics = self.num_quadratics(quadratics_tolerance);
        let step = S::ONE / num_quadratics;
        let n = num_quadratics.to_u32().unwrap_or(1);
        let mut t0 = S::ZERO;
        for _ in 0..(n - 1) {
            let t1 = t0 + step;

            let quadratic = self.split_range(t0..t1).to_quadratic();
            quadratic.for_each_flattened(flattening_tolerance, &mut *callback);

            t0 = t1;
        }

        // Do the last step manually to make sure we finish at t = 1.0 exactly.
        let quadratic = self.split_range(t0..S::ONE).to_quadratic();
        quadratic.for_each_flattened(flattening_tolerance, callback);
    }
}
