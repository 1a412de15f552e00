//! Facade: input/output stores plus everything proxies share.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{AttributeBuffer, BufferPool, PointStore, Side};
use crate::tags::Tags;
use crate::types::{Value, ValueKind};
use crate::util::{Error, Result, Settings};

/// Pairs an input and an output [`PointStore`] with the buffer pool, the tag
/// collection and the attribute buffers handed out so far.
pub struct Facade {
    input: Arc<dyn PointStore>,
    output: Arc<dyn PointStore>,
    pool: BufferPool,
    tags: Tags,
    settings: Settings,
    buffers: RwLock<HashMap<(String, Side), Arc<AttributeBuffer>>>,
}

impl Facade {
    /// Facade reading and writing the same store.
    pub fn new(store: Arc<dyn PointStore>) -> Self {
        Self::with_output(Arc::clone(&store), store)
    }

    /// Facade reading `input` and writing `output`.
    pub fn with_output(input: Arc<dyn PointStore>, output: Arc<dyn PointStore>) -> Self {
        Self {
            input,
            output,
            pool: BufferPool::new(),
            tags: Tags::new(),
            settings: Settings::default(),
            buffers: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    pub fn store(&self, side: Side) -> &Arc<dyn PointStore> {
        match side {
            Side::In => &self.input,
            Side::Out => &self.output,
        }
    }

    #[inline]
    pub fn input(&self) -> &Arc<dyn PointStore> {
        &self.input
    }

    #[inline]
    pub fn output(&self) -> &Arc<dyn PointStore> {
        &self.output
    }

    pub fn num_points(&self, side: Side) -> usize {
        self.store(side).num_points()
    }

    #[inline]
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Buffer already handed out for `name` on `side`.
    pub fn find_buffer(&self, name: &str, side: Side) -> Option<Arc<AttributeBuffer>> {
        self.buffers.read().get(&(name.to_string(), side)).cloned()
    }

    /// Buffer for reading attribute `name` on `side`, reused when one exists.
    ///
    /// Input buffers are read-only snapshots. Output buffers are write
    /// buffers so later writers see the same values.
    pub fn readable(&self, name: &str, side: Side) -> Result<Arc<AttributeBuffer>> {
        if let Some(buffer) = self.find_buffer(name, side) {
            return Ok(buffer);
        }
        let column = self
            .store(side)
            .attribute(name)
            .ok_or_else(|| Error::AttributeNotFound(name.to_string()))?;
        if side == Side::Out {
            return self.writable(name, column.kind());
        }

        let mut buffers = self.buffers.write();
        let buffer = buffers
            .entry((name.to_string(), side))
            .or_insert_with(|| Arc::new(AttributeBuffer::readable(column, side)));
        Ok(Arc::clone(buffer))
    }

    /// Write buffer for attribute `name` on the output store.
    ///
    /// The column is created with the default of `kind` when missing and
    /// the buffer starts from its current values.
    pub fn writable(&self, name: &str, kind: ValueKind) -> Result<Arc<AttributeBuffer>> {
        let key = (name.to_string(), Side::Out);
        if let Some(buffer) = self.buffers.read().get(&key) {
            return check_kind(buffer, kind);
        }

        let column = self.output.create_attribute(name, kind, Value::default_of(kind))?;
        let mut buffers = self.buffers.write();
        let buffer = buffers
            .entry(key)
            .or_insert_with(|| Arc::new(AttributeBuffer::writable(column)));
        check_kind(buffer, kind)
    }

    /// Write every write buffer back to the output store.
    ///
    /// Returns the number of buffers flushed.
    pub fn flush(&self) -> usize {
        let buffers = self.buffers.read();
        let flushed = buffers.values().filter(|b| b.flush()).count();
        if flushed > 0 {
            tracing::debug!("Flushed {} attribute buffer(s)", flushed);
        }
        flushed
    }
}

fn check_kind(buffer: &Arc<AttributeBuffer>, kind: ValueKind) -> Result<Arc<AttributeBuffer>> {
    if buffer.kind() == kind && buffer.is_writable() {
        Ok(Arc::clone(buffer))
    } else if buffer.kind() != kind {
        Err(Error::TypeMismatch { expected: kind, actual: buffer.kind() })
    } else {
        Err(Error::ReadOnly(buffer.name().to_string()))
    }
}

impl std::fmt::Debug for Facade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facade")
            .field("in_points", &self.input.num_points())
            .field("out_points", &self.output.num_points())
            .field("buffers", &self.buffers.read().len())
            .field("pool", &self.pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PointCloud;

    #[test]
    fn test_readable_is_reused() {
        let cloud = Arc::new(PointCloud::new(2));
        cloud.add_attribute("A", vec![1i32, 2]);
        let f = Facade::new(cloud);
        let a = f.readable("A", Side::In).unwrap();
        let b = f.readable("A", Side::In).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(matches!(f.readable("B", Side::In), Err(Error::AttributeNotFound(_))));
    }

    #[test]
    fn test_writable_creates_and_flushes() {
        let input = Arc::new(PointCloud::new(3));
        let output = Arc::new(PointCloud::new(3));
        let f = Facade::with_output(input.clone(), output.clone());

        let buf = f.writable("Score", ValueKind::Float).unwrap();
        buf.write(2, Value::Float(4.5));
        assert_eq!(output.attribute("Score").unwrap().read(2), Value::Float(0.0));
        assert_eq!(f.flush(), 1);
        assert_eq!(output.attribute("Score").unwrap().read(2), Value::Float(4.5));
        assert!(input.attribute("Score").is_none());

        assert!(matches!(f.writable("Score", ValueKind::Int32), Err(Error::TypeMismatch { .. })));
    }
}
