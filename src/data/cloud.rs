//! In-memory point store.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{AttributeColumn, Point, PointProperty, PointStore, Slots};
use crate::types::{convert_or_default, AttributeType, Value, ValueKind};
use crate::util::{Error, Result};

/// Attribute column with one lock per value.
///
/// The outer lock is only taken exclusively to resize or replace the whole
/// column; per-index access shares it.
#[derive(Debug)]
pub struct Column {
    name: String,
    kind: ValueKind,
    default: Value,
    values: RwLock<Slots>,
}

impl Column {
    /// Column of `len` copies of `default`.
    pub fn filled(name: impl Into<String>, default: Value, len: usize) -> Self {
        Self {
            name: name.into(),
            kind: default.kind(),
            values: RwLock::new(Slots::from_values(vec![default.clone(); len])),
            default,
        }
    }

    /// Column from values, all converted to `kind`.
    pub fn from_values(name: impl Into<String>, kind: ValueKind, values: Vec<Value>) -> Self {
        let values: Slots = values.into_iter().map(|v| coerce(v, kind)).collect();
        Self {
            name: name.into(),
            kind,
            default: Value::default_of(kind),
            values: RwLock::new(values),
        }
    }

    fn resize(&self, len: usize) {
        let mut values = self.values.write();
        if values.len() != len {
            *values = values.resized(len, &self.default);
        }
    }
}

#[inline]
fn coerce(value: Value, kind: ValueKind) -> Value {
    if value.kind() == kind {
        value
    } else {
        convert_or_default(&value, kind)
    }
}

impl AttributeColumn for Column {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn len(&self) -> usize {
        self.values.read().len()
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn read(&self, index: usize) -> Value {
        self.values.read().get(index).unwrap_or_else(|| self.default.clone())
    }

    fn write(&self, index: usize, value: Value) {
        let value = coerce(value, self.kind);
        self.values.read().set(index, value);
    }

    fn snapshot(&self) -> Vec<Value> {
        self.values.read().to_vec()
    }

    fn write_all(&self, values: Vec<Value>) {
        let kind = self.kind;
        *self.values.write() = values.into_iter().map(|v| coerce(v, kind)).collect();
    }
}

/// Points, attribute columns and data-domain values held in memory.
///
/// Points and column values are locked one by one; writers on disjoint
/// indices do not block each other.
#[derive(Debug, Default)]
pub struct PointCloud {
    points: RwLock<Vec<RwLock<Point>>>,
    attributes: RwLock<HashMap<String, Arc<Column>>>,
    data: RwLock<HashMap<String, Value>>,
}

impl PointCloud {
    /// `count` default points.
    pub fn new(count: usize) -> Self {
        Self::from_points(vec![Point::default(); count])
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points: RwLock::new(points.into_iter().map(RwLock::new).collect()),
            ..Self::default()
        }
    }

    /// Add (or replace) a column holding `values`.
    ///
    /// The column kind is `T::KIND`; the point count grows to fit.
    pub fn add_attribute<T: AttributeType>(&self, name: &str, values: Vec<T>) -> Arc<Column> {
        let values = values.into_iter().map(T::into_value).collect();
        self.insert_column(Column::from_values(name, T::KIND, values))
    }

    /// Add (or replace) a column of type-erased values converted to `kind`.
    pub fn add_values(&self, name: &str, kind: ValueKind, values: Vec<Value>) -> Arc<Column> {
        self.insert_column(Column::from_values(name, kind, values))
    }

    fn insert_column(&self, column: Column) -> Arc<Column> {
        let len = column.len();
        if len > self.num_points() {
            self.points.write().resize_with(len, || RwLock::new(Point::default()));
            for other in self.attributes.read().values() {
                other.resize(len);
            }
        }
        column.resize(self.num_points());
        let column = Arc::new(column);
        self.attributes.write().insert(column.name.clone(), Arc::clone(&column));
        tracing::debug!("Column '{}' ({}) added, {} values", column.name, column.kind, len);
        column
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        self.attributes.write().remove(name).is_some()
    }

    /// Copy of point `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.read().get(index).map(|p| *p.read())
    }

    /// Apply `f` to every point.
    pub fn update_points(&self, mut f: impl FnMut(usize, &mut Point)) {
        for (i, p) in self.points.read().iter().enumerate() {
            f(i, &mut p.write());
        }
    }
}

impl PointStore for PointCloud {
    fn num_points(&self) -> usize {
        self.points.read().len()
    }

    fn attribute(&self, name: &str) -> Option<Arc<dyn AttributeColumn>> {
        self.attributes
            .read()
            .get(name)
            .map(|c| Arc::clone(c) as Arc<dyn AttributeColumn>)
    }

    fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attributes.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn create_attribute(&self, name: &str, kind: ValueKind, default: Value) -> Result<Arc<dyn AttributeColumn>> {
        if let Some(existing) = self.attributes.read().get(name) {
            return if existing.kind == kind {
                Ok(Arc::clone(existing) as Arc<dyn AttributeColumn>)
            } else {
                Err(Error::TypeMismatch { expected: kind, actual: existing.kind })
            };
        }

        let mut attributes = self.attributes.write();
        // Another writer may have created it between the two locks.
        if let Some(existing) = attributes.get(name) {
            return if existing.kind == kind {
                Ok(Arc::clone(existing) as Arc<dyn AttributeColumn>)
            } else {
                Err(Error::TypeMismatch { expected: kind, actual: existing.kind })
            };
        }
        let column = Arc::new(Column::filled(name, coerce(default, kind), self.num_points()));
        attributes.insert(name.to_string(), Arc::clone(&column));
        tracing::debug!("Created attribute '{}' ({})", name, kind);
        Ok(column)
    }

    fn read_property(&self, index: usize, property: PointProperty) -> Value {
        match self.points.read().get(index) {
            Some(p) => p.read().get(property, index),
            None => Value::default_of(property.kind()),
        }
    }

    fn write_property(&self, index: usize, property: PointProperty, value: &Value) {
        if let Some(p) = self.points.read().get(index) {
            p.write().set(property, value);
        }
    }

    fn data_value(&self, name: &str) -> Option<Value> {
        self.data.read().get(name).cloned()
    }

    fn set_data_value(&self, name: &str, value: Value) {
        self.data.write().insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DVec3;

    #[test]
    fn test_add_attribute_grows_points() {
        let cloud = PointCloud::new(2);
        cloud.add_attribute("Speed", vec![1.0f64, 2.0, 3.0]);
        assert_eq!(cloud.num_points(), 3);

        let col = cloud.attribute("Speed").unwrap();
        assert_eq!(col.kind(), ValueKind::Double);
        assert_eq!(col.read(2), Value::Double(3.0));
        assert_eq!(col.read(10), Value::Double(0.0));
    }

    #[test]
    fn test_short_column_padded() {
        let cloud = PointCloud::new(4);
        let col = cloud.add_attribute("Id", vec![7i32]);
        assert_eq!(col.len(), 4);
        assert_eq!(col.read(3), Value::Int32(0));
    }

    #[test]
    fn test_create_attribute() {
        let cloud = PointCloud::new(3);
        let a = cloud.create_attribute("Dir", ValueKind::Vector3, Value::Double(1.0)).unwrap();
        assert_eq!(a.read(1), Value::Vector3(DVec3::ONE));
        assert!(cloud.create_attribute("Dir", ValueKind::Vector3, Value::default_of(ValueKind::Vector3)).is_ok());
        assert!(matches!(
            cloud.create_attribute("Dir", ValueKind::Int32, Value::Int32(0)),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_write_converts() {
        let cloud = PointCloud::new(2);
        let col = cloud.add_attribute("N", vec![0i64, 0]);
        col.write(1, Value::string("42"));
        assert_eq!(col.read(1), Value::Int64(42));
        col.write(5, Value::Int64(1));
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn test_properties_and_data() {
        let cloud = PointCloud::from_points(vec![Point::at(DVec3::new(1.0, 2.0, 3.0))]);
        assert_eq!(cloud.read_property(0, PointProperty::Position), Value::Vector3(DVec3::new(1.0, 2.0, 3.0)));
        cloud.write_property(0, PointProperty::Seed, &Value::Int32(5));
        assert_eq!(cloud.point(0).map(|p| p.seed), Some(5));

        cloud.set_data_value("Count", Value::Int64(7));
        assert_eq!(cloud.data_kind("Count"), Some(ValueKind::Int64));
        assert_eq!(cloud.data_value("Missing"), None);
    }

    #[test]
    fn test_disjoint_writes_do_not_block() {
        let cloud = PointCloud::new(4);
        let col = cloud.add_attribute("A", vec![0i32; 4]);
        let held = col.values.read();
        let _slot = held.0[0].write();
        col.write(1, Value::Int32(7));
        assert_eq!(col.read(1), Value::Int32(7));
        drop(_slot);
        drop(held);

        let points = cloud.points.read();
        let _point = points[0].write();
        cloud.write_property(1, PointProperty::Density, &Value::Float(0.5));
        assert_eq!(cloud.read_property(1, PointProperty::Density), Value::Float(0.5));
    }
}
