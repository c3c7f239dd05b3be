//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! While it would be possible for the tessellator to manually generate vertex
//! and index buffers with a certain layout, it would mean that most code using it
//! would have to copy and convert all generated vertices in order to have its own
//! vertex layout, or de-interleaved vertex formats, which is a very common use-case.
//!
//! In order to flexibly and efficiently build geometry of various flavors, this
//! module contains a number of builder interfaces centered around the idea of
//! building vertex and index buffers without having to know about the final
//! vertex and index types.
//!
//! See:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html)
//! * [`FillGeometryBuilder`](trait.FillGeometryBuilder.html)
//!
//! The traits above are what the tessellator interfaces with. It is very common to
//! push vertices and indices into a pair of vectors, so to facilitate this pattern
//! this module also provides:
//!
//! * The struct [`VertexBuffers`](struct.VertexBuffers.html), a simple pair of
//!   vectors of indices and vertices (generic parameters).
//! * The struct [`BuffersBuilder`](struct.BuffersBuilder.html) which writes into a
//!   [`VertexBuffers`](struct.VertexBuffers.html) and implements the geometry
//!   builder traits. It takes care of filling the buffers while producing vertices
//!   is delegated to a vertex constructor.
//! * The trait [`FillVertexConstructor`](trait.FillVertexConstructor.html) in
//!   order to generate any vertex type from the positions the tessellator emits.
//!   The simplest vertex constructor is [`Positions`](struct.Positions.html)
//!   which returns the vertex position untransformed.
//!
//! Geometry builders are a practical way to add one last step to the tessellation
//! pipeline, such as applying a transform or clipping the geometry.
//!
//! ## Examples
//!
//! ### Generating the vertex positions directly
//!
//! ```
//! use tessera_tessellation::geometry_builder::{VertexBuffers, simple_builder};
//! use tessera_tessellation::{FillTessellator, FillOptions};
//! use tessera_tessellation::path::math::{Point, point};
//! use tessera_tessellation::path::Path;
//!
//! fn main() -> tessera_tessellation::TessellationResult {
//!     let mut builder = Path::builder();
//!     builder.begin(point(0.0, 0.0));
//!     builder.line_to(point(10.0, 0.0));
//!     builder.line_to(point(10.0, 10.0));
//!     builder.end(true);
//!     let path = builder.build();
//!
//!     let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
//!     let mut tessellator = FillTessellator::new();
//!     tessellator.tessellate(
//!         &path,
//!         &FillOptions::default(),
//!         &mut simple_builder(&mut buffers),
//!     )?;
//!
//!     println!(" -- {} vertices, {} indices", buffers.vertices.len(), buffers.indices.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Generating custom vertices
//!
//! The example below implements the `FillVertexConstructor` trait in order to
//! use a custom vertex type `MyVertex` (containing position and color), storing
//! the tessellation in a `VertexBuffers<MyVertex, u16>`.
//!
//! ```
//! use tessera_tessellation::geometry_builder::{FillVertexConstructor, VertexBuffers, BuffersBuilder};
//! use tessera_tessellation::{FillTessellator, FillOptions};
//! use tessera_tessellation::path::math::{Point, point};
//! use tessera_tessellation::path::Path;
//!
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!     position: [f32; 2],
//!     color: [f32; 4],
//! }
//!
//! struct WithColor([f32; 4]);
//!
//! impl FillVertexConstructor<MyVertex> for WithColor {
//!     fn new_vertex(&mut self, position: Point) -> MyVertex {
//!         MyVertex {
//!             position: position.to_array(),
//!             color: self.0,
//!         }
//!     }
//! }
//!
//! fn main() -> tessera_tessellation::TessellationResult {
//!     let mut builder = Path::builder();
//!     builder.begin(point(0.0, 0.0));
//!     builder.line_to(point(10.0, 0.0));
//!     builder.line_to(point(10.0, 10.0));
//!     builder.end(true);
//!     let path = builder.build();
//!
//!     let mut buffers: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//!     let mut tessellator = FillTessellator::new();
//!     tessellator.tessellate(
//!         &path,
//!         &FillOptions::default(),
//!         &mut BuffersBuilder::new(&mut buffers, WithColor([1.0, 0.0, 0.0, 1.0])),
//!     )?;
//!
//!     Ok(())
//! }
//! ```

use crate::math::Point;
use crate::{GeometryBuilderError, Index, VertexId};

/// An interface separating tessellators and other geometry generation
/// algorithms from the actual vertex construction.
///
/// Depending on which tessellator a geometry builder interfaces with, it also
/// has to implement the [`FillGeometryBuilder`](trait.FillGeometryBuilder.html)
/// trait.
///
/// See the [`geometry_builder`](index.html) module documentation for more detail.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// End the geometry with either `end_geometry` or `abort_geometry`.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Insert a triangle made of vertices that were added after the last call
    /// to `begin_geometry`.
    ///
    /// This method can only be called between `begin_geometry` and `end_geometry`.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// Abort the geometry generation.
    ///
    /// This method can only be called between `begin_geometry` and `end_geometry`.
    /// After this method is called, the geometry is expected to be in the same
    /// state as it was at the time `begin_geometry` was called, and to remain
    /// in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A geometry builder to interface with the [`FillTessellator`](../struct.FillTessellator.html).
///
/// Types implementing this trait must also implement the
/// [`GeometryBuilder`](trait.GeometryBuilder.html) trait.
pub trait FillGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex, providing its position.
    /// Returns a vertex id that is only valid between `begin_geometry` and
    /// `end_geometry`.
    ///
    /// This method can only be called between `begin_geometry` and `end_geometry`.
    fn add_fill_vertex(&mut self, position: Point) -> Result<VertexId, GeometryBuilderError>;
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default)]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// A temporary view on a `VertexBuffers` object which facilitates the population
/// of vertex and index data.
///
/// Often, algorithms are built to generate vertex positions without knowledge of
/// eventual other vertex attributes. The `VertexConstructor` does the translation
/// from position to `OutputVertex`. If your logic generates the actual vertex type
/// directly, you can use the `SimpleBuffersBuilder` convenience typedef.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_constructor: ctor,
        }
    }
}

/// A trait specifying how to create vertex values.
pub trait FillVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, position: Point) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl FillVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, position: Point) -> Point {
        position
    }
}

impl<F, OutputVertex> FillVertexConstructor<OutputVertex> for F
where
    F: Fn(Point) -> OutputVertex,
{
    fn new_vertex(&mut self, position: Point) -> OutputVertex {
        self(position)
    }
}

/// A `BuffersBuilder` that takes the actual vertex type as input.
pub type SimpleBuffersBuilder<'l> = BuffersBuilder<'l, Point, u16, Positions>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder(buffers: &mut VertexBuffers<Point, u16>) -> SimpleBuffersBuilder<'_> {
    BuffersBuilder::new(buffers, Positions)
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: From<VertexId> + MaxIndex,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push(a.into());
        self.buffers.indices.push(b.into());
        self.buffers.indices.push(c.into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> FillGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: From<VertexId> + MaxIndex,
    Ctor: FillVertexConstructor<OutputVertex>,
{
    fn add_fill_vertex(&mut self, position: Point) -> Result<VertexId, GeometryBuilderError> {
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(position));
        let len = self.buffers.vertices.len();
        if len > OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        Ok(VertexId((len - 1) as Index))
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
pub struct NoOutput {
    next_vertex: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { next_vertex: 0 }
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder for NoOutput {
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
    }
}

impl FillGeometryBuilder for NoOutput {
    fn add_fill_vertex(&mut self, _position: Point) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to `u32::MAX` because the tessellator can't internally represent more
/// than `u32::MAX` indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u8 {
    const MAX: usize = u8::MAX as usize;
}
impl MaxIndex for i8 {
    const MAX: usize = i8::MAX as usize;
}
impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for i16 {
    const MAX: usize = i16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for i32 {
    const MAX: usize = i32::MAX as usize;
}
// The tessellator internally uses u32 indices so we can't have more than u32::MAX.
impl MaxIndex for u64 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for i64 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for isize {
    const MAX: usize = u32::MAX as usize;
}
