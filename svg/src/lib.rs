#![deny(bare_trait_objects)]

//! SVG path-data parsing for the tessera crates.
//!
//! Only the subset of the path-data grammar used by the rest of the pipeline
//! is supported, see [`parser::parse_path_data`].

pub use tessera_path as path;

pub mod parser;

#[doc(inline)]
pub use crate::parser::{parse_path_data, ParseError};
