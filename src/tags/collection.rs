//! Tag collection shared by a point collection.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{flatten, sniff_value, try_parse_tag, BoxedValue, ParsedTag};
use crate::types::Value;

#[derive(Clone, Default)]
struct TagSet {
    raw: BTreeSet<String>,
    values: BTreeMap<String, BoxedValue>,
}

impl TagSet {
    fn insert(&mut self, parsed: ParsedTag) {
        match parsed {
            ParsedTag::Raw(tag) => {
                if !self.values.contains_key(&tag) {
                    self.raw.insert(tag);
                }
            }
            ParsedTag::Value { key, value } => {
                self.raw.remove(&key);
                self.values.insert(key, value);
            }
        }
    }
}

/// Raw tags plus `key -> value` tags.
///
/// A key is either raw or valued, never both: setting a value replaces the
/// raw tag, and a raw tag whose key already carries a value is ignored.
/// Guarded by a reader/writer lock so tagging can happen from any thread.
#[derive(Default)]
pub struct Tags {
    inner: RwLock<TagSet>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection parsed from tag strings.
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        let out = Self::new();
        {
            let mut inner = out.inner.write();
            for tag in tags {
                inner.insert(try_parse_tag(tag));
            }
        }
        out
    }

    /// Add a tag string; `Key:Value` strings become value tags.
    pub fn add_raw(&self, tag: &str) {
        self.inner.write().insert(try_parse_tag(tag));
    }

    pub fn set(&self, key: &str, value: Value) {
        self.inner.write().insert(ParsedTag::Value {
            key: key.to_string(),
            value: BoxedValue::new(value),
        });
    }

    /// Set `key` to `text` sniffed the way tag values are.
    pub fn set_parsed(&self, key: &str, text: &str) {
        self.set(key, sniff_value(text));
    }

    /// Remove `key` whether raw or valued. Returns `true` when it existed.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.inner.write();
        let raw = inner.raw.remove(key);
        let value = inner.values.remove(key).is_some();
        raw || value
    }

    pub fn has(&self, key: &str) -> bool {
        let inner = self.inner.read();
        inner.raw.contains(key) || inner.values.contains_key(key)
    }

    pub fn get_value(&self, key: &str) -> Option<BoxedValue> {
        self.inner.read().values.get(key).cloned()
    }

    pub fn raw_tags(&self) -> Vec<String> {
        self.inner.read().raw.iter().cloned().collect()
    }

    pub fn value_tags(&self) -> Vec<(String, BoxedValue)> {
        self.inner
            .read()
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Every tag as a string, sorted.
    pub fn flatten(&self) -> Vec<String> {
        let inner = self.inner.read();
        let mut out: Vec<String> = inner
            .raw
            .iter()
            .cloned()
            .chain(inner.values.iter().map(|(k, v)| flatten(k, v)))
            .collect();
        out.sort();
        out
    }

    /// Merge `other` into this collection; values in `other` win.
    pub fn append(&self, other: &Tags) {
        if std::ptr::eq(self, other) {
            return;
        }
        let snapshot = other.inner.read().clone();
        let mut inner = self.inner.write();
        for tag in snapshot.raw {
            inner.insert(ParsedTag::Raw(tag));
        }
        for (key, value) in snapshot.values {
            inner.insert(ParsedTag::Value { key, value });
        }
    }

    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.raw.clear();
        inner.values.clear();
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        inner.raw.len() + inner.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for Tags {
    fn clone(&self) -> Self {
        Self {
            inner: RwLock::new(self.inner.read().clone()),
        }
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.flatten()).finish()
    }
}
