#![deny(bare_trait_objects)]

//! Turning vector paths into triangle meshes.
//!
//! # Crates
//!
//! This meta-crate (`tessera`) reexports the following sub-crates for
//! convenience:
//!
//! * **tessera_tessellation** - The stroke widener and the fill tessellator.
//! * **tessera_path** - Tools to build and iterate over paths.
//! * **tessera_geom** - 2d utilities for line segments, cubic and quadratic
//!   bézier curves.
//! * **tessera_svg** - A parser for a subset of the SVG path-data syntax
//!   (behind the `svg` feature flag).
//!
//! Each `tessera_<name>` crate is reexported as a `<name>` module in
//! `tessera`. For example:
//!
//! ```ignore
//! use tessera_tessellation::FillTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use tessera::tessellation::FillTessellator;
//! ```
//!
//! # Examples
//!
//! ## Filling a path
//!
//! ```
//! use tessera::math::{point, Point};
//! use tessera::path::Path;
//! use tessera::tessellation::{FillTessellator, FillOptions, VertexBuffers};
//! use tessera::tessellation::geometry_builder::simple_builder;
//!
//! fn main() {
//!     let mut geometry: VertexBuffers<Point, u16> = VertexBuffers::new();
//!     let mut geometry_builder = simple_builder(&mut geometry);
//!     let options = FillOptions::tolerance(0.1);
//!     let mut tessellator = FillTessellator::new();
//!
//!     let mut builder = Path::builder();
//!     builder.begin(point(0.0, 0.0));
//!     builder.line_to(point(50.0, 0.0));
//!     builder.line_to(point(50.0, 50.0));
//!     builder.line_to(point(0.0, 50.0));
//!     builder.end(true);
//!
//!     tessellator
//!         .tessellate(&builder.build(), &options, &mut geometry_builder)
//!         .unwrap();
//!
//!     println!("The generated vertices are: {:?}.", &geometry.vertices[..]);
//!     println!("The generated indices are: {:?}.", &geometry.indices[..]);
//! }
//! ```

pub use tessera_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

#[cfg(feature = "svg")]
pub use tessera_svg as svg;

pub use crate::path::math;
