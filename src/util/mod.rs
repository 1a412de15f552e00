//! Utility types shared by the whole crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math types: glam re-exports, [`Rotator`], [`Transform`], [`Axis`]
//! - [`hash32`] / [`hash_combine`] - Value hashing
//! - [`Settings`] - Engine tunables

mod error;
mod hash;
mod math;
mod settings;

pub use error::*;
pub use hash::*;
pub use math::*;
pub use settings::*;
