//! Dense value arrays and attribute buffers.

use parking_lot::RwLock;
use std::sync::Arc;

use super::{AttributeColumn, Side};
use crate::types::{convert_or_default, AttributeType, Value, ValueKind};

/// Fixed-length run of values with one lock per slot.
///
/// Access to distinct indices never contends, so workers over disjoint
/// ranges proceed without serializing on the whole run.
#[derive(Debug, Default)]
pub struct Slots(pub(super) Box<[RwLock<Value>]>);

impl Slots {
    pub fn from_values(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.get(index).map(|slot| slot.read().clone())
    }

    /// Store `value` at `index`. Returns `false` past the end.
    #[inline]
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.get(index) {
            Some(slot) => {
                *slot.write() = value;
                true
            }
            None => false,
        }
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.iter().map(|slot| slot.read().clone()).collect()
    }

    /// Copy resized to `len`, padding with `fill`.
    pub fn resized(&self, len: usize, fill: &Value) -> Self {
        let mut values = self.to_vec();
        values.resize(len, fill.clone());
        Self::from_values(values)
    }
}

impl FromIterator<Value> for Slots {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().map(RwLock::new).collect())
    }
}

/// Dense array of values of a single kind, shareable across proxies.
#[derive(Debug)]
pub struct ValueArray {
    kind: ValueKind,
    values: Slots,
}

impl ValueArray {
    /// `len` default values of `kind`.
    pub fn new(kind: ValueKind, len: usize) -> Self {
        Self { kind, values: Slots::from_values(vec![Value::default_of(kind); len]) }
    }

    pub fn from_slice<T: AttributeType>(values: &[T]) -> Self {
        Self {
            kind: T::KIND,
            values: values.iter().cloned().map(T::into_value).collect(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Value {
        self.values.get(index).unwrap_or_else(|| Value::default_of(self.kind))
    }

    pub fn set(&self, index: usize, value: Value) {
        let value = if value.kind() == self.kind { value } else { convert_or_default(&value, self.kind) };
        self.values.set(index, value);
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.values.to_vec()
    }
}

/// Buffered view of one attribute column.
///
/// Readable buffers snapshot the column when created. Writable buffers start
/// from the column's current values and are written back by
/// [`Facade::flush`](super::Facade::flush).
pub struct AttributeBuffer {
    side: Side,
    writable: bool,
    column: Arc<dyn AttributeColumn>,
    values: Slots,
}

impl AttributeBuffer {
    /// Read-only snapshot of `column`.
    pub fn readable(column: Arc<dyn AttributeColumn>, side: Side) -> Self {
        let values = Slots::from_values(column.snapshot());
        Self { side, writable: false, column, values }
    }

    /// Write buffer over `column`, initialized from its values.
    pub fn writable(column: Arc<dyn AttributeColumn>) -> Self {
        let values = Slots::from_values(column.snapshot());
        Self { side: Side::Out, writable: true, column, values }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.column.name()
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.column.kind()
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        true
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Buffer reflects the output store rather than the input.
    #[inline]
    pub fn reads_from_output(&self) -> bool {
        self.side == Side::Out
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn read(&self, index: usize) -> Value {
        self.values.get(index).unwrap_or_else(|| self.column.default_value())
    }

    /// Store `value`; ignored on readable buffers and past the end.
    pub fn write(&self, index: usize, value: Value) {
        if !self.writable {
            return;
        }
        let kind = self.kind();
        let value = if value.kind() == kind { value } else { convert_or_default(&value, kind) };
        self.values.set(index, value);
    }

    /// Push buffered values to the column. Returns `false` for read buffers.
    pub fn flush(&self) -> bool {
        if !self.writable {
            return false;
        }
        self.column.write_all(self.values.to_vec());
        true
    }
}

impl std::fmt::Debug for AttributeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeBuffer")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("side", &self.side)
            .field("writable", &self.writable)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PointCloud, PointStore};

    #[test]
    fn test_value_array() {
        let arr = ValueArray::from_slice(&[1i32, 2, 3]);
        assert_eq!(arr.kind(), ValueKind::Int32);
        arr.set(1, Value::Double(9.7));
        assert_eq!(arr.get(1), Value::Int32(9));
        assert_eq!(arr.get(3), Value::Int32(0));
        assert_eq!(arr.len(), 3);
    }

    #[test]
    fn test_slots_lock_per_index() {
        let slots = Slots::from_values(vec![Value::Int32(0); 4]);
        let held = slots.0[0].write();
        assert!(slots.set(1, Value::Int32(5)));
        assert_eq!(slots.get(1), Some(Value::Int32(5)));
        assert!(slots.0[2].try_write().is_some());
        drop(held);
        assert!(!slots.set(4, Value::Int32(1)));
        assert_eq!(slots.resized(6, &Value::Int32(9)).get(5), Some(Value::Int32(9)));
    }

    #[test]
    fn test_read_buffer_is_snapshot() {
        let cloud = PointCloud::new(2);
        let col = cloud.add_attribute("A", vec![1.0f64, 2.0]);
        let buf = AttributeBuffer::readable(col.clone(), Side::In);
        col.write(0, Value::Double(5.0));
        assert_eq!(buf.read(0), Value::Double(1.0));
        buf.write(0, Value::Double(3.0));
        assert_eq!(buf.read(0), Value::Double(1.0));
        assert!(!buf.flush());
    }

    #[test]
    fn test_write_buffer_flush() {
        let cloud = PointCloud::new(2);
        cloud.add_attribute("A", vec![1.0f64, 2.0]);
        let buf = AttributeBuffer::writable(cloud.attribute("A").unwrap());
        buf.write(1, Value::Int32(8));
        assert_eq!(cloud.attribute("A").unwrap().read(1), Value::Double(2.0));
        assert!(buf.flush());
        assert_eq!(cloud.attribute("A").unwrap().read(1), Value::Double(8.0));
    }
}
