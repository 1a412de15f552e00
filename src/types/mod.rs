//! Value kinds, values and the operations defined over every kind.
//!
//! - [`ValueKind`] - The closed set of 15 kinds
//! - [`Value`] / [`AttributeType`] - Tagged values and their Rust types
//! - [`TypeTrait`] / [`trait_of`] - Per-kind classification table
//! - [`ConversionTable`] / [`convert`] - Any-to-any conversion matrix
//! - [`BlendOp`] / [`blender`] - Per-kind blend operations
//! - [`text`] - Printed forms and parsers shared by conversions and tags

mod blend;
mod cast;
mod convert;
mod kind;
pub mod text;
mod traits;
mod value;

pub use blend::*;
pub use convert::*;
pub use kind::*;
pub use traits::*;
pub use value::*;
