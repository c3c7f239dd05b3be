#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Tessellation of 2D fill and stroke operations.
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [FillTessellator](struct.FillTessellator.html) - Tessellator for complex path fill
//!   operations.
//! * [StrokeWidener](struct.StrokeWidener.html) - Converts the stroke of a path into a
//!   fillable outline path.
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the
//!   documentation of the [geometry_builder module](geometry_builder/index.html)) which
//!   the tessellator is built on. This trait provides an interface for types that help
//!   with building and assembling the vertices and triangles that form the tessellation,
//!   usually in the form of arbitrary vertex and index buffers.
//!
//! ## The tessellation pipeline
//!
//! Filling a path goes through the [FillTessellator](struct.FillTessellator.html)
//! directly. Stroking is done in two steps: the
//! [StrokeWidener](struct.StrokeWidener.html) first converts the stroke into a new path
//! that outlines the stroked area (with round joins and round caps), and that outline is
//! then filled like any other path. This mirrors how widening works in most 2D rendering
//! APIs.
//!
//! ### The output: geometry builders
//!
//! The tessellator is parametrized over a type implementing the
//! [FillGeometryBuilder trait](geometry_builder/trait.FillGeometryBuilder.html).
//! This trait provides some simple methods to add vertices and triangles, without
//! enforcing any particular representation for the resulting geometry. This is important
//! because each application will usually want to work with its own vertex type tailored
//! to a certain rendering model.
//!
//! The structs [VertexBuffers](geometry_builder/struct.VertexBuffers.html) and
//! [BuffersBuilder](geometry_builder/struct.BuffersBuilder.html) are provided for
//! convenience.
//!
//! ### Flattening and tolerance
//!
//! The tessellator operates on flattened paths (paths or shapes represented by
//! sequences of line segments). When paths contain bézier curves, the latter need to be
//! approximated with sequences of line segments. This approximation depends on a
//! `tolerance` parameter which represents the maximum distance between a curve and its
//! flattened approximation.
//!
//! More explanation about flattening and tolerance in the
//! [tessera_geom crate](../tessera_geom/index.html).

pub use tessera_path as path;

mod error;
mod fill;
pub mod geometry_builder;
mod stroke;


pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::stroke::*;

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, FillGeometryBuilder, FillVertexConstructor, GeometryBuilder, VertexBuffers,
};

#[doc(inline)]
pub use crate::error::*;

pub use crate::path::FillRule;

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}
impl From<VertexId> for i32 {
    fn from(v: VertexId) -> Self {
        v.0 as i32
    }
}
impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}

/// Parameters for the stroke widener.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Line width.
    ///
    /// There is no default: a width must always be provided explicitly, see
    /// [`StrokeOptions::width`].
    pub line_width: f32,

    /// Maximum allowed distance to the path when building an approximation.
    ///
    /// See [Flattening and tolerance](index.html#flattening-and-tolerance).
    ///
    /// Default value: `StrokeOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl StrokeOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.25;

    /// Creates stroke options with the given line width.
    #[inline]
    pub const fn width(line_width: f32) -> Self {
        StrokeOptions {
            line_width,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct FillOptions {
    /// Maximum allowed distance to the path when building an approximation.
    ///
    /// See [Flattening and tolerance](index.html#flattening-and-tolerance).
    ///
    /// Default value: `FillOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// Set the fill rule.
    ///
    /// See the [SVG specification](https://www.w3.org/TR/SVG/painting.html#FillRuleProperty).
    ///
    /// Default value: `NonZero`.
    pub fill_rule: FillRule,
}

impl FillOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.25;
    /// Default fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::NonZero;

    pub const DEFAULT: Self = FillOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        fill_rule: Self::DEFAULT_FILL_RULE,
    };

    #[inline]
    pub fn non_zero() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub fn even_odd() -> Self {
        let mut options = Self::DEFAULT;
        options.fill_rule = FillRule::EvenOdd;
        options
    }

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
