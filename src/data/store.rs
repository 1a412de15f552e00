//! Storage collaborator interfaces.
//!
//! The engine never owns point data. It reads and writes through these two
//! traits; [`PointCloud`](super::PointCloud) is the in-memory implementation.
//! Every method takes `&self` so one store can be shared by many proxies
//! across worker threads.

use std::sync::Arc;

use super::PointProperty;
use crate::types::{Value, ValueKind};
use crate::util::Result;

/// One typed attribute column.
pub trait AttributeColumn: Send + Sync {
    fn name(&self) -> &str;

    /// Kind of every stored value.
    fn kind(&self) -> ValueKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value returned for indices past the end.
    fn default_value(&self) -> Value;

    /// Value at `index`, or the default past the end.
    fn read(&self, index: usize) -> Value;

    /// Store `value` at `index`. Values of another kind are converted to
    /// [`kind`](Self::kind); writes past the end are dropped.
    fn write(&self, index: usize, value: Value);

    /// Copy of every value.
    fn snapshot(&self) -> Vec<Value>;

    /// Replace every value at once.
    fn write_all(&self, values: Vec<Value>);
}

/// A point collection: per-point properties, attribute columns and
/// collection-level (data domain) values.
pub trait PointStore: Send + Sync {
    fn num_points(&self) -> usize;

    fn attribute(&self, name: &str) -> Option<Arc<dyn AttributeColumn>>;

    fn attribute_names(&self) -> Vec<String>;

    /// Find `name`, or create it filled with `default`.
    ///
    /// Fails with `TypeMismatch` when it exists with another kind.
    fn create_attribute(&self, name: &str, kind: ValueKind, default: Value) -> Result<Arc<dyn AttributeColumn>>;

    fn read_property(&self, index: usize, property: PointProperty) -> Value;

    fn write_property(&self, index: usize, property: PointProperty, value: &Value);

    fn data_value(&self, name: &str) -> Option<Value>;

    fn set_data_value(&self, name: &str, value: Value);

    fn data_kind(&self, name: &str) -> Option<ValueKind> {
        self.data_value(name).map(|v| v.kind())
    }
}
