//! # attrkit
//!
//! Type-erased attribute value engine for point-cloud processing.
//!
//! Attributes are stored as one of 15 value kinds and read or written by
//! consumers in any other kind. Selectors such as `Orientation.Up` or
//! `Xform.Position.X` pick a field, axis or transform part of a composite
//! value; proxies resolve every conversion once at construction so
//! per-point access is a few function-pointer calls.
//!
//! ## Modules
//!
//! - [`util`] - Errors, math types, hashing, settings
//! - [`types`] - Value kinds, trait table, conversion matrix, blending
//! - [`select`] - Selectors and sub-selections
//! - [`data`] - Stores, buffers, proxies, facade
//! - [`tags`] - Boxed values and `Key:Value` tags
//!
//! ## Example
//!
//! ```ignore
//! use attrkit::prelude::*;
//!
//! let cloud = Arc::new(PointCloud::new(4));
//! cloud.add_attribute("Speed", vec![12.5f64; 4]);
//! let facade = Facade::new(cloud);
//!
//! let desc = ProxyDescriptor::capture(&facade, "Speed", Side::In)?
//!     .with_working_kind(ValueKind::Vector3);
//! let proxy = get_proxy_buffer(&facade, &desc)?;
//! assert_eq!(proxy.get::<DVec3>(0), DVec3::splat(12.5));
//! ```

pub mod data;
pub mod select;
pub mod tags;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use util::{Error, Result, Settings};
pub use types::{Value, ValueKind};

/// Build the conversion and keyword tables.
///
/// Both are built lazily on first use; call this before spawning workers so
/// no worker pays for it.
pub fn init() {
    let conversions = types::ConversionTable::get();
    let keywords = select::Keywords::get();
    tracing::debug!(
        "attrkit ready: {} conversions, {} keywords",
        conversions.supported_count(),
        keywords.len()
    );
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{
        get_per_field_proxy_buffers, get_proxy_buffer, BufferProxy, Facade, PointCloud, PointProperty,
        PointStore, ProxyDescriptor, Role, Side,
    };
    pub use crate::select::{Selector, SubSelection};
    pub use crate::tags::{try_parse_tag, BoxedValue, ParsedTag, Tags};
    pub use crate::types::{convert, AttributeType, BlendOp, Value, ValueKind};
    pub use crate::util::{DQuat, DVec2, DVec3, DVec4, Error, Result, Rotator, Settings, Transform};
    pub use std::sync::Arc;
}
