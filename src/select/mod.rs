//! Selectors and sub-selections.
//!
//! - [`Selector`] - `Name.Extra.Tokens`, `$Property`, `@Data.Name`
//! - [`SubSelection`] - Field / axis / transform part addressed by the extras
//! - [`CachedSubSelection`] - Sub-selection resolved for a (real, working) kind pair
//! - [`Keywords`] - Case-insensitive keyword tables
//! - Field, axis and component operations per kind

mod cached;
mod fields;
mod keywords;
mod selector;
mod sub_selection;

pub use cached::*;
pub use fields::*;
pub use keywords::*;
pub use selector::*;
pub use sub_selection::*;
