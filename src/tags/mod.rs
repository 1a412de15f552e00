//! Boxed values and tags.
//!
//! - [`BoxedValue`] - One value with cached text and number forms
//! - [`try_parse_tag`] / [`flatten`] - `Key:Value` tag codec
//! - [`Tags`] - Thread-safe tag collection
//! - [`has_matching_tags`] / [`compare`] / [`compare_str`] - Queries and comparisons

mod boxed;
mod codec;
mod collection;
mod matching;

pub use boxed::*;
pub use codec::*;
pub use collection::*;
pub use matching::*;
