//! Point storage, buffers and proxies.
//!
//! - [`PointStore`] / [`AttributeColumn`] - Storage interfaces; [`PointCloud`] implements them in memory
//! - [`PointProperty`] / [`Point`] - Per-point engine properties
//! - [`AttributeBuffer`] / [`ValueArray`] - Buffered and dense value storage
//! - [`ProxyDescriptor`] - What a proxy binds to
//! - [`BufferProxy`] - Uniform typed access, five variants
//! - [`get_proxy_buffer`] / [`get_per_field_proxy_buffers`] - Proxy factory
//! - [`BufferPool`] - Shared read proxies
//! - [`Facade`] - Input/output stores, pool, tags and write buffers
//! - [`for_each_range`] / [`transform_range`] / [`blend_range`] - Parallel loops

mod buffer;
mod cloud;
mod descriptor;
mod facade;
mod factory;
mod parallel;
mod pool;
mod property;
mod proxy;
mod store;

pub use buffer::*;
pub use cloud::*;
pub use descriptor::*;
pub use facade::*;
pub use factory::*;
pub use parallel::*;
pub use pool::*;
pub use property::*;
pub use proxy::*;
pub use store::*;
