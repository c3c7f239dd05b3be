//! The fill tessellator.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::error::{DegenerateGeometry, TessellationError, UnsupportedParameter};
use crate::geom::{CubicBezierSegment, LineSegment, Triangle};
use crate::geometry_builder::FillGeometryBuilder;
use crate::math::{vector, Point};
use crate::path::{FillRule, Path, PathEvent};
use crate::{FillOptions, TessellationResult, VertexId};

// Signed areas below this are considered degenerate.
const AREA_THRESHOLD: f32 = 1e-7;

/// A fill tessellator.
///
/// The tessellator turns the filled area of arbitrary paths (self-intersecting
/// or overlapping subpaths included) into a set of non-overlapping triangles.
///
/// Input paths are first flattened according to the tolerance threshold, then
/// the filled area is resolved with the configured fill rule, and finally the
/// resulting shape is triangulated. Curve approximation aside, the triangles
/// cover exactly the area that the fill rule selects: the sum of their areas
/// converges to the filled area as the tolerance decreases.
///
/// Open subpaths are implicitly closed with a line segment back to their
/// first point, matching the SVG filling behavior.
///
/// # Examples
///
/// ```
/// use tessera_tessellation::{FillTessellator, FillOptions};
/// use tessera_tessellation::geometry_builder::{VertexBuffers, simple_builder};
/// use tessera_tessellation::math::{point, Point};
/// use tessera_tessellation::path::Path;
///
/// fn main() -> tessera_tessellation::TessellationResult {
///     let mut builder = Path::builder();
///     builder.begin(point(0.0, 0.0));
///     builder.line_to(point(10.0, 0.0));
///     builder.line_to(point(10.0, 10.0));
///     builder.line_to(point(0.0, 10.0));
///     builder.end(true);
///     let path = builder.build();
///
///     let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
///     let mut tessellator = FillTessellator::new();
///     tessellator.tessellate(
///         &path,
///         &FillOptions::default(),
///         &mut simple_builder(&mut buffers),
///     )?;
///
///     assert_eq!(buffers.indices.len() % 3, 0);
///
///     Ok(())
/// }
/// ```
pub struct FillTessellator {
    // Flattened input rings, kept around to answer winding queries.
    rings: Vec<Vec<Point>>,
}

impl FillTessellator {
    /// Constructor.
    pub fn new() -> Self {
        FillTessellator { rings: Vec::new() }
    }

    /// Compute the tessellation from a path.
    pub fn tessellate(
        &mut self,
        path: &Path,
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        if options.tolerance.is_nan() {
            return Err(UnsupportedParameter::ToleranceIsNaN.into());
        }
        let tolerance = options.tolerance.max(1e-4);

        self.rings.clear();
        flatten_path(path, tolerance, &mut self.rings)?;

        if self.rings.is_empty() {
            return Ok(());
        }

        output.begin_geometry();
        match tessellate_rings(&self.rings, options.fill_rule, output) {
            Ok(()) => {
                output.end_geometry();
                Ok(())
            }
            Err(e) => {
                output.abort_geometry();
                Err(e)
            }
        }
    }
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Flattens each subpath into a ring of distinct points. A subpath with fewer
/// than three distinct points cannot enclose any area and is a
/// degenerate-geometry error.
fn flatten_path(
    path: &Path,
    tolerance: f32,
    rings: &mut Vec<Vec<Point>>,
) -> Result<(), TessellationError> {
    let mut ring: Vec<Point> = Vec::new();

    let mut push = |ring: &mut Vec<Point>, p: Point| {
        match ring.last() {
            Some(last) if *last == p => {}
            _ => ring.push(p),
        }
    };

    for event in path {
        match event {
            PathEvent::Begin { at } => {
                nan_check(at)?;
                ring.clear();
                push(&mut ring, at);
            }
            PathEvent::Line { to, .. } => {
                nan_check(to)?;
                push(&mut ring, to);
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
                curve.for_each_flattened(tolerance, &mut |p| push(&mut ring, p));
            }
            PathEvent::End { .. } => {
                // Open subpaths are implicitly closed when filling.
                if ring.last() == ring.first() {
                    ring.pop();
                }
                if ring.len() < 3 {
                    return Err(DegenerateGeometry::NotEnoughPoints.into());
                }
                rings.push(std::mem::take(&mut ring));
            }
        }
    }

    Ok(())
}

fn nan_check(p: Point) -> Result<(), TessellationError> {
    if p.x.is_nan() || p.y.is_nan() {
        return Err(UnsupportedParameter::PositionIsNaN.into());
    }
    Ok(())
}

// Vertices are identified by the exact bits of their coordinates. Both edges
// taking part in an intersection record the same intersection point, so the
// keys match without any snapping.
type VertexKey = (u32, u32);

fn vertex_key(p: Point) -> VertexKey {
    (p.x.to_bits(), p.y.to_bits())
}

struct HalfEdge {
    from: usize,
    to: usize,
    twin: usize,
    next: usize,
}

struct Cycle {
    points: Vec<Point>,
    area: f32,
}

/// Tessellates a set of flattened rings.
///
/// The rings are resolved into a planar subdivision (splitting edges at
/// every intersection), the faces selected by the fill rule are extracted,
/// and each face is triangulated by ear clipping.
fn tessellate_rings(
    rings: &[Vec<Point>],
    fill_rule: FillRule,
    output: &mut dyn FillGeometryBuilder,
) -> TessellationResult {
    let cycles = extract_cycles(rings);

    // Boundary cycles of bounded faces wind counter-clockwise, cycles that
    // bound a face from the inside (holes, and the unbounded face) wind
    // clockwise. Both have the face they bound on their left.
    let mut faces: Vec<(Cycle, Vec<Vec<Point>>)> = Vec::new();
    let mut kept = Vec::new();
    let mut hole_cycles = Vec::new();
    for cycle in cycles {
        if cycle.area > AREA_THRESHOLD {
            let sample = face_sample(&cycle.points);
            kept.push(fill_rule.is_in(winding_number(sample, rings)));
            faces.push((cycle, Vec::new()));
        } else if cycle.area < -AREA_THRESHOLD {
            hole_cycles.push(cycle);
        }
    }

    // Attach each hole cycle to the face it punches a hole into: the face
    // whose outer boundary is the smallest counter-clockwise cycle containing
    // a point of the region the hole cycle bounds.
    for hole in hole_cycles {
        let sample = face_sample(&hole.points);
        let mut owner: Option<usize> = None;
        for (i, (outer, _)) in faces.iter().enumerate() {
            if point_in_polygon(sample, &outer.points)
                && owner.map_or(true, |o| outer.area < faces[o].0.area)
            {
                owner = Some(i);
            }
        }
        // A clockwise cycle with no containing face bounds the unbounded face.
        if let Some(i) = owner {
            if kept[i] {
                faces[i].1.push(hole.points);
            }
        }
    }

    let mut vertices: HashMap<VertexKey, VertexId> = HashMap::new();

    for (i, (outer, holes)) in faces.into_iter().enumerate() {
        if !kept[i] {
            continue;
        }

        let mut polygon = outer.points;
        let mut holes = holes;
        // Bridge the rightmost holes first so that later bridges cannot
        // cross the ones already inserted.
        holes.sort_by(|a, b| {
            let ax = a.iter().map(|p| p.x).fold(f32::MIN, f32::max);
            let bx = b.iter().map(|p| p.x).fold(f32::MIN, f32::max);
            bx.partial_cmp(&ax).unwrap_or(std::cmp::Ordering::Equal)
        });
        for hole in &holes {
            merge_hole(&mut polygon, hole);
        }

        ear_clip(&polygon, &mut |a, b, c| {
            let va = add_vertex(a, &mut vertices, output)?;
            let vb = add_vertex(b, &mut vertices, output)?;
            let vc = add_vertex(c, &mut vertices, output)?;
            if va != vb && vb != vc && va != vc {
                output.add_triangle(va, vb, vc);
            }
            Ok(())
        })?;
    }

    Ok(())
}

fn add_vertex(
    p: Point,
    vertices: &mut HashMap<VertexKey, VertexId>,
    output: &mut dyn FillGeometryBuilder,
) -> Result<VertexId, TessellationError> {
    match vertices.entry(vertex_key(p)) {
        Entry::Occupied(entry) => Ok(*entry.get()),
        Entry::Vacant(entry) => {
            let id = output.add_fill_vertex(p)?;
            entry.insert(id);
            Ok(id)
        }
    }
}

/// Builds the planar subdivision induced by the rings and extracts its
/// boundary cycles.
fn extract_cycles(rings: &[Vec<Point>]) -> Vec<Cycle> {
    // Collect the input edges.
    let mut segments: Vec<LineSegment<f32>> = Vec::new();
    for ring in rings {
        let n = ring.len();
        for i in 0..n {
            let from = ring[i];
            let to = ring[(i + 1) % n];
            if from != to {
                segments.push(LineSegment { from, to });
            }
        }
    }

    // Split the edges at every pairwise intersection. The intersection point
    // is computed once and recorded on both edges so that the two sub-edge
    // endpoints are bit-identical.
    let mut splits: Vec<Vec<(f32, Point)>> = vec![Vec::new(); segments.len()];
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if let Some((t, u)) = segments[i].intersection_t(&segments[j]) {
                let p = segments[i].sample(t);
                splits[i].push((t, p));
                splits[j].push((u, p));
            }
        }
    }

    let mut vertices: Vec<Point> = Vec::new();
    let mut vertex_ids: HashMap<VertexKey, usize> = HashMap::new();
    let mut vertex_of = |p: Point, vertices: &mut Vec<Point>| -> usize {
        *vertex_ids.entry(vertex_key(p)).or_insert_with(|| {
            vertices.push(p);
            vertices.len() - 1
        })
    };

    let mut sub_edges: Vec<(usize, usize)> = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for (segment, splits) in segments.iter().zip(splits.iter_mut()) {
        splits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut prev = vertex_of(segment.from, &mut vertices);
        for (_, p) in splits.iter().chain(std::iter::once(&(1.0, segment.to))) {
            let next = vertex_of(*p, &mut vertices);
            if next != prev {
                // Coincident edges from overlapping input are merged: the
                // faces on either side are determined by winding queries
                // against the original rings, not by edge multiplicity.
                let key = (prev.min(next), prev.max(next));
                if seen.insert(key) {
                    sub_edges.push((prev, next));
                }
                prev = next;
            }
        }
    }

    // Half-edge structure: every sub-edge becomes two directed half-edges.
    let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(sub_edges.len() * 2);
    for &(a, b) in &sub_edges {
        let id = half_edges.len();
        half_edges.push(HalfEdge {
            from: a,
            to: b,
            twin: id + 1,
            next: usize::MAX,
        });
        half_edges.push(HalfEdge {
            from: b,
            to: a,
            twin: id,
            next: usize::MAX,
        });
    }

    // Sort the outgoing half-edges of each vertex by angle.
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (id, he) in half_edges.iter().enumerate() {
        outgoing[he.from].push(id);
    }
    let mut position = vec![0usize; half_edges.len()];
    for list in &mut outgoing {
        list.sort_by(|&a, &b| {
            let va = vertices[half_edges[a].to] - vertices[half_edges[a].from];
            let vb = vertices[half_edges[b].to] - vertices[half_edges[b].from];
            let aa = va.y.atan2(va.x);
            let ab = vb.y.atan2(vb.x);
            aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
        });
        for (k, &id) in list.iter().enumerate() {
            position[id] = k;
        }
    }

    // Link each half-edge to the next one along the boundary of the face on
    // its left: the clockwise neighbor of its twin around the destination
    // vertex.
    for id in 0..half_edges.len() {
        let v = half_edges[id].to;
        let list = &outgoing[v];
        let k = position[half_edges[id].twin];
        half_edges[id].next = list[(k + list.len() - 1) % list.len()];
    }

    // Walk the next links to extract the boundary cycles.
    let mut cycles = Vec::new();
    let mut visited = vec![false; half_edges.len()];
    for start in 0..half_edges.len() {
        if visited[start] {
            continue;
        }
        let mut points = Vec::new();
        let mut area = 0.0;
        let mut current = start;
        loop {
            visited[current] = true;
            let he = &half_edges[current];
            let from = vertices[he.from];
            let to = vertices[he.to];
            points.push(from);
            area += from.to_vector().cross(to.to_vector());
            current = he.next;
            if current == start {
                break;
            }
        }
        cycles.push(Cycle {
            points,
            area: area * 0.5,
        });
    }

    cycles
}

/// Returns a point inside the face a boundary cycle bounds: slightly on the
/// left of the cycle's longest edge.
fn face_sample(points: &[Point]) -> Point {
    let n = points.len();
    let mut best = 0;
    let mut best_len = -1.0;
    for i in 0..n {
        let len = (points[(i + 1) % n] - points[i]).square_length();
        if len > best_len {
            best_len = len;
            best = i;
        }
    }
    let a = points[best];
    let b = points[(best + 1) % n];
    let dir = (b - a).normalize();
    let delta = (best_len.sqrt() * 1e-3).max(1e-5);
    a.lerp(b, 0.5) + vector(-dir.y, dir.x) * delta
}

/// Computes the winding number of a point with respect to a set of rings.
fn winding_number(p: Point, rings: &[Vec<Point>]) -> i16 {
    rings.iter().map(|ring| ring_winding(p, ring)).sum()
}

fn ring_winding(p: Point, ring: &[Point]) -> i16 {
    let mut winding = 0i16;
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && (b - a).cross(p - a) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && (b - a).cross(p - a) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    ring_winding(p, polygon) != 0
}

/// Splices a hole into the polygon with a zero-width bridge to a visible
/// vertex, so that the result is a single (weakly simple) polygon.
///
/// The polygon winds counter-clockwise, the hole clockwise.
fn merge_hole(polygon: &mut Vec<Point>, hole: &[Point]) {
    // Rightmost hole vertex.
    let mut im = 0;
    for (i, p) in hole.iter().enumerate() {
        if p.x > hole[im].x {
            im = i;
        }
    }
    let m = hole[im];

    // Cast a ray towards +x and find the closest crossing polygon edge.
    let mut best: Option<(usize, f32)> = None;
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y <= m.y) == (b.y <= m.y) || a.y == b.y {
            continue;
        }
        let x = a.x + (m.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x >= m.x && best.map_or(true, |(_, bx)| x < bx) {
            best = Some((i, x));
        }
    }

    let visible = match best {
        Some((i, x)) => {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            // The edge endpoint on the right of the crossing is a candidate;
            // any polygon vertex inside the triangle (m, crossing, candidate)
            // would block the bridge, in which case the blocking vertex
            // closest in angle to the ray is used instead.
            let candidate = if a.x > b.x { i } else { (i + 1) % n };
            let tri = Triangle {
                a: m,
                b: Point::new(x, m.y),
                c: polygon[candidate],
            };
            let mut visible = candidate;
            let mut best_tan = f32::MAX;
            for (j, p) in polygon.iter().enumerate() {
                if j == candidate || !tri.contains_point(*p) {
                    continue;
                }
                let tan = ((p.y - m.y) / (p.x - m.x)).abs();
                if tan < best_tan {
                    best_tan = tan;
                    visible = j;
                }
            }
            visible
        }
        None => {
            // No crossing edge. Fall back to the closest polygon vertex.
            let mut visible = 0;
            let mut best_dist = f32::MAX;
            for (j, p) in polygon.iter().enumerate() {
                let d = (*p - m).square_length();
                if d < best_dist {
                    best_dist = d;
                    visible = j;
                }
            }
            visible
        }
    };

    // polygon[..=visible], the whole hole starting and ending at `im`, then
    // back to `visible` and the rest of the polygon.
    let mut merged = Vec::with_capacity(polygon.len() + hole.len() + 2);
    merged.extend_from_slice(&polygon[..=visible]);
    merged.extend_from_slice(&hole[im..]);
    merged.extend_from_slice(&hole[..=im]);
    merged.extend_from_slice(&polygon[visible..]);
    *polygon = merged;
}

/// Triangulates a counter-clockwise (weakly simple) polygon by ear clipping.
fn ear_clip(
    polygon: &[Point],
    emit: &mut dyn FnMut(Point, Point, Point) -> TessellationResult,
) -> TessellationResult {
    let mut indices: Vec<usize> = (0..polygon.len()).collect();

    while indices.len() > 2 {
        let len = indices.len();
        let mut clipped = false;

        for k in 0..len {
            let prev = polygon[indices[(k + len - 1) % len]];
            let cur = polygon[indices[k]];
            let next = polygon[indices[(k + 1) % len]];
            let cross = (cur - prev).cross(next - cur);
            if cross <= 0.0 {
                continue;
            }

            let tri = Triangle {
                a: prev,
                b: cur,
                c: next,
            };
            // Bridge duplicates coincide with a corner and are skipped;
            // contains_point is strict so boundary points don't block ears.
            let blocked = indices.iter().any(|&j| {
                let p = polygon[j];
                p != prev && p != cur && p != next && tri.contains_point(p)
            });
            if blocked {
                continue;
            }

            if cross > AREA_THRESHOLD {
                emit(prev, cur, next)?;
            }
            indices.remove(k);
            clipped = true;
            break;
        }

        if !clipped {
            // Numerical stalemate. Clip the most convex corner to guarantee
            // progress; at this point the remaining area is negligible.
            let mut best = 0;
            let mut best_cross = f32::MIN;
            for k in 0..len {
                let prev = polygon[indices[(k + len - 1) % len]];
                let cur = polygon[indices[k]];
                let next = polygon[indices[(k + 1) % len]];
                let cross = (cur - prev).cross(next - cur);
                if cross > best_cross {
                    best_cross = cross;
                    best = k;
                }
            }
            let prev = polygon[indices[(best + len - 1) % len]];
            let cur = polygon[indices[best]];
            let next = polygon[indices[(best + 1) % len]];
            if best_cross > AREA_THRESHOLD {
                emit(prev, cur, next)?;
            }
            indices.remove(best);
        }
    }

    Ok(())
}
