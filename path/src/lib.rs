#![deny(bare_trait_objects)]

//! Data structures to represent 2D paths.
//!
//! This crate provides the `Path` data structure the rest of the tessera
//! crates operate on: a compact storage of verbs and points that can be
//! iterated over as a sequence of [`PathEvent`]s, plus the builders used to
//! assemble paths either manually or from parsed path-data commands.

pub use tessera_geom as geom;

pub mod commands;
mod events;
pub mod path;

#[doc(inline)]
pub use crate::commands::{build_path, BuildError, Command};
#[doc(inline)]
pub use crate::events::PathEvent;
#[doc(inline)]
pub use crate::path::{Builder, Path};

pub mod math {
    //! f32 version of the tessera_geom types used everywhere. Most other
    //! tessera crates reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }
}

/// The fill rule defines how to determine what is inside and what is outside
/// of a shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i16) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i16) -> bool {
        !self.is_in(winding_number)
    }
}
