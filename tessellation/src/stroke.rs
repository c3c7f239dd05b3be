//! Converts strokes into fillable outline paths.

use crate::error::{DegenerateGeometry, TessellationError, UnsupportedParameter};
use crate::geom::CubicBezierSegment;
use crate::math::{vector, Point, Vector};
use crate::path::path::Builder;
use crate::path::{Path, PathEvent};
use crate::StrokeOptions;

use std::f32::consts::PI;

// Points closer than this are considered the same when flattening.
const MERGE_THRESHOLD: f32 = 1e-6;

/// Computes the outline of stroked paths.
///
/// The widener does not produce triangles directly. Instead it converts the
/// stroke of a path into a new path that traces the boundary of the stroked
/// area, with round joins at the vertices and round caps at the extremities
/// of open subpaths. Filling the resulting path with the non-zero fill rule
/// yields the stroked shape.
///
/// Closed subpaths produce two outline subpaths with opposite windings (one
/// on each side of the spine) so that the area between them, and only it,
/// has a non-zero winding number.
///
/// # Examples
///
/// ```
/// use tessera_tessellation::{StrokeWidener, StrokeOptions};
/// use tessera_tessellation::path::Path;
/// use tessera_tessellation::math::point;
///
/// fn main() -> Result<(), tessera_tessellation::TessellationError> {
///     let mut builder = Path::builder();
///     builder.begin(point(0.0, 0.0));
///     builder.line_to(point(100.0, 0.0));
///     builder.end(false);
///     let path = builder.build();
///
///     let mut widener = StrokeWidener::new();
///     let outline = widener.widen(&path, &StrokeOptions::width(4.0))?;
///     assert!(!outline.is_empty());
///
///     Ok(())
/// }
/// ```
pub struct StrokeWidener {
    // Flattened spine of the subpath being widened, reused between subpaths.
    spine: Vec<Point>,
    // Outline ring under construction.
    ring: Vec<Point>,
}

impl StrokeWidener {
    pub fn new() -> Self {
        StrokeWidener {
            spine: Vec::new(),
            ring: Vec::new(),
        }
    }

    /// Computes the outline of the given path, stroked with `options.line_width`.
    ///
    /// Curves are flattened according to `options.tolerance` before offsetting.
    /// Subpaths that reduce to a single point have no well defined stroke
    /// direction and produce a [`DegenerateGeometry::EmptySubpath`] error.
    pub fn widen(
        &mut self,
        path: &Path,
        options: &StrokeOptions,
    ) -> Result<Path, TessellationError> {
        if !options.line_width.is_finite() || options.line_width <= 0.0 {
            return Err(DegenerateGeometry::InvalidStrokeWidth.into());
        }
        if options.tolerance.is_nan() {
            return Err(UnsupportedParameter::ToleranceIsNaN.into());
        }

        let radius = options.line_width * 0.5;
        let tolerance = options.tolerance.max(1e-4);

        let mut output = Path::builder();

        for event in path {
            match event {
                PathEvent::Begin { at } => {
                    nan_check(at)?;
                    self.spine.clear();
                    self.push_spine_point(at);
                }
                PathEvent::Line { to, .. } => {
                    nan_check(to)?;
                    self.push_spine_point(to);
                }
                PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                } => {
                    nan_check(ctrl1)?;
                    nan_check(ctrl2)?;
                    nan_check(to)?;
                    let curve = CubicBezierSegment {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    };
                    let spine = &mut self.spine;
                    curve.for_each_flattened(tolerance, &mut |p| {
                        if (p - *spine.last().unwrap()).square_length()
                            > MERGE_THRESHOLD * MERGE_THRESHOLD
                        {
                            spine.push(p);
                        }
                    });
                }
                PathEvent::End { close, .. } => {
                    self.widen_subpath(close, radius, tolerance, &mut output)?;
                }
            }
        }

        Ok(output.build())
    }

    fn push_spine_point(&mut self, p: Point) {
        match self.spine.last() {
            Some(last) if (p - *last).square_length() <= MERGE_THRESHOLD * MERGE_THRESHOLD => {}
            _ => self.spine.push(p),
        }
    }

    fn widen_subpath(
        &mut self,
        close: bool,
        radius: f32,
        tolerance: f32,
        output: &mut Builder,
    ) -> Result<(), TessellationError> {
        // For closed subpaths the wrap-around segment can be degenerate if
        // the spine ends where it started.
        if close && self.spine.len() > 1 {
            let first = self.spine[0];
            let last = *self.spine.last().unwrap();
            if (last - first).square_length() <= MERGE_THRESHOLD * MERGE_THRESHOLD {
                self.spine.pop();
            }
        }

        if self.spine.len() < 2 {
            return Err(DegenerateGeometry::EmptySubpath.into());
        }

        if close {
            // One ring on each side of the spine, wound in opposite
            // directions so that only the stroked area winds non-zero.
            self.ring.clear();
            offset_ring(&mut self.ring, &self.spine, radius, tolerance);
            flush_ring(&self.ring, output);

            self.spine.reverse();
            self.ring.clear();
            offset_ring(&mut self.ring, &self.spine, radius, tolerance);
            flush_ring(&self.ring, output);
        } else {
            // A single ring: left side forward, round cap, right side
            // backward (which is the left side of the reversed spine),
            // round cap back to the start.
            self.ring.clear();
            offset_polyline(&mut self.ring, &self.spine, radius, tolerance);

            let n = self.spine.len();
            let end_dir = (self.spine[n - 1] - self.spine[n - 2]).normalize();
            add_cap(&mut self.ring, self.spine[n - 1], end_dir, radius, tolerance);

            self.spine.reverse();
            offset_polyline(&mut self.ring, &self.spine, radius, tolerance);

            let start_dir = (self.spine[n - 1] - self.spine[n - 2]).normalize();
            add_cap(&mut self.ring, self.spine[n - 1], start_dir, radius, tolerance);

            flush_ring(&self.ring, output);
        }

        Ok(())
    }
}

impl Default for StrokeWidener {
    fn default() -> Self {
        Self::new()
    }
}

fn nan_check(p: Point) -> Result<(), TessellationError> {
    if p.x.is_nan() || p.y.is_nan() {
        return Err(UnsupportedParameter::PositionIsNaN.into());
    }
    Ok(())
}

fn flush_ring(ring: &[Point], output: &mut Builder) {
    output.begin(ring[0]);
    for p in &ring[1..] {
        output.line_to(*p);
    }
    output.end(true);
}

fn left_normal(dir: Vector) -> Vector {
    vector(-dir.y, dir.x)
}

/// Appends the left-side offset of an open polyline, with round joins.
fn offset_polyline(ring: &mut Vec<Point>, points: &[Point], radius: f32, tolerance: f32) {
    let mut prev_normal: Option<Vector> = None;
    for i in 0..points.len() - 1 {
        let dir = (points[i + 1] - points[i]).normalize();
        let normal = left_normal(dir) * radius;
        if let Some(prev) = prev_normal {
            add_arc(ring, points[i], prev, normal, radius, tolerance);
        }
        ring.push(points[i] + normal);
        ring.push(points[i + 1] + normal);
        prev_normal = Some(normal);
    }
}

/// Appends the left-side offset of a closed ring of distinct points, with a
/// round join at every vertex including the wrap-around one.
fn offset_ring(ring: &mut Vec<Point>, points: &[Point], radius: f32, tolerance: f32) {
    let n = points.len();
    let normals: Vec<Vector> = (0..n)
        .map(|i| left_normal((points[(i + 1) % n] - points[i]).normalize()) * radius)
        .collect();

    for i in 0..n {
        let prev = normals[(i + n - 1) % n];
        let cur = normals[i];
        ring.push(points[i] + prev);
        add_arc(ring, points[i], prev, cur, radius, tolerance);
        ring.push(points[i] + cur);
        // The segment towards the next vertex is implicit: the next
        // iteration starts at points[i + 1] + cur.
    }
}

/// Appends the intermediate points of the arc around `center` going from
/// offset `from` to offset `to` (both of length `radius`), taking the
/// shortest way around. The arc's endpoints are the caller's responsibility.
fn add_arc(ring: &mut Vec<Point>, center: Point, from: Vector, to: Vector, radius: f32, tolerance: f32) {
    let start = from.angle_from_x_axis().radians;
    let mut sweep = to.angle_from_x_axis().radians - start;
    if sweep > PI {
        sweep -= 2.0 * PI;
    } else if sweep < -PI {
        sweep += 2.0 * PI;
    }

    // A direction reversal at the vertex leaves the half-turn side ambiguous.
    // The join then acts as a cap and must sweep away from the spine, which
    // is the negative side since `from` is the left-hand offset.
    if from.cross(to) == 0.0 && from.dot(to) < 0.0 {
        sweep = -PI;
    }

    emit_arc(ring, center, start, sweep, radius, tolerance);
}

/// Appends the intermediate points of a half-circle cap around `endpoint`.
///
/// `dir` is the (unit) direction of the spine at the endpoint. The cap
/// sweeps from the left-side offset through `endpoint + dir * radius` to the
/// right-side offset, both of which the caller pushes itself.
fn add_cap(ring: &mut Vec<Point>, endpoint: Point, dir: Vector, radius: f32, tolerance: f32) {
    let start = (left_normal(dir) * radius).angle_from_x_axis().radians;
    emit_arc(ring, endpoint, start, -PI, radius, tolerance);
}

fn emit_arc(
    ring: &mut Vec<Point>,
    center: Point,
    start: f32,
    sweep: f32,
    radius: f32,
    tolerance: f32,
) {
    let step = circle_flattening_step(radius, tolerance);
    let arc_len = sweep.abs() * radius;
    let num_segments = (arc_len / step).ceil().max(1.0) as u32;

    for i in 1..num_segments {
        let angle = start + sweep * (i as f32 / num_segments as f32);
        ring.push(center + vector(angle.cos(), angle.sin()) * radius);
    }
}

pub(crate) fn circle_flattening_step(radius: f32, mut tolerance: f32) -> f32 {
    // Don't allow high tolerance values (compared to the radius) to avoid edge cases.
    tolerance = f32::min(tolerance, radius);
    2.0 * f32::sqrt(2.0 * tolerance * radius - tolerance * tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::path::PathEvent;

    fn subpath_count(path: &Path) -> usize {
        path.iter()
            .filter(|evt| matches!(evt, PathEvent::Begin { .. }))
            .count()
    }

    #[test]
    fn open_segment_is_a_single_ring() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(100.0, 0.0));
        builder.end(false);

        let outline = StrokeWidener::new()
            .widen(&builder.build(), &StrokeOptions::width(10.0))
            .unwrap();

        assert_eq!(subpath_count(&outline), 1);

        // Every outline point is at distance `width / 2` from the spine.
        let spine = crate::geom::LineSegment {
            from: point(0.0f32, 0.0),
            to: point(100.0, 0.0),
        };
        for evt in &outline {
            if let PathEvent::Line { to, .. } = evt {
                let d = spine.distance_to_point(to);
                assert!((d - 5.0).abs() < 0.3, "distance {} for point {:?}", d, to);
            }
        }
    }

    #[test]
    fn closed_subpath_produces_two_rings() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(100.0, 0.0));
        builder.line_to(point(100.0, 100.0));
        builder.line_to(point(0.0, 100.0));
        builder.end(true);

        let outline = StrokeWidener::new()
            .widen(&builder.build(), &StrokeOptions::width(4.0))
            .unwrap();

        assert_eq!(subpath_count(&outline), 2);
    }

    #[test]
    fn invalid_width() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.end(false);
        let path = builder.build();

        let mut widener = StrokeWidener::new();
        for width in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert_eq!(
                widener.widen(&path, &StrokeOptions::width(width)),
                Err(DegenerateGeometry::InvalidStrokeWidth.into()),
            );
        }
    }

    #[test]
    fn single_point_subpath() {
        let mut builder = Path::builder();
        builder.begin(point(1.0, 1.0));
        builder.end(false);
        let path = builder.build();

        assert_eq!(
            StrokeWidener::new().widen(&path, &StrokeOptions::width(4.0)),
            Err(DegenerateGeometry::EmptySubpath.into()),
        );
    }

    #[test]
    fn nan_position() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(f32::NAN, 0.0));
        builder.end(false);
        let path = builder.build();

        assert_eq!(
            StrokeWidener::new().widen(&path, &StrokeOptions::width(4.0)),
            Err(UnsupportedParameter::PositionIsNaN.into()),
        );
    }

    #[test]
    fn curves_are_flattened() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.cubic_bezier_to(point(30.0, 100.0), point(70.0, 100.0), point(100.0, 0.0));
        builder.end(false);
        let path = builder.build();

        let outline = StrokeWidener::new()
            .widen(&path, &StrokeOptions::width(2.0).with_tolerance(0.05))
            .unwrap();

        let mut count = 0;
        for evt in &outline {
            if evt.is_edge() {
                count += 1;
            }
        }
        // A flattened curve with offsets on both sides produces many segments.
        assert!(count > 20, "only {} edges", count);
    }
}
