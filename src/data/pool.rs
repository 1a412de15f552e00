//! Shared read proxies.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::BufferProxy;
use crate::util::Result;

/// Read proxies keyed by descriptor hash.
///
/// Hits only take the read lock. A miss builds the proxy outside any lock,
/// then takes the write lock and re-checks so concurrent misses for the same
/// key all end up with the first inserted proxy.
#[derive(Default)]
pub struct BufferPool {
    proxies: RwLock<HashMap<u64, Arc<dyn BufferProxy>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: u64) -> Option<Arc<dyn BufferProxy>> {
        self.proxies.read().get(&key).cloned()
    }

    /// Pooled proxy for `key`, building it with `create` on a miss.
    pub fn get_or_create<F>(&self, key: u64, create: F) -> Result<Arc<dyn BufferProxy>>
    where
        F: FnOnce() -> Result<Arc<dyn BufferProxy>>,
    {
        if let Some(proxy) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(proxy);
        }

        let created = create()?;
        let mut proxies = self.proxies.write();
        if let Some(existing) = proxies.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(existing));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        proxies.insert(key, Arc::clone(&created));
        tracing::debug!("Pooled proxy {:016x} ({} total)", key, proxies.len());
        Ok(created)
    }

    pub fn len(&self) -> usize {
        self.proxies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.read().is_empty()
    }

    pub fn clear(&self) {
        self.proxies.write().clear();
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (hits, misses) = self.stats();
        f.debug_struct("BufferPool")
            .field("len", &self.len())
            .field("hits", &hits)
            .field("misses", &misses)
            .finish()
    }
}
