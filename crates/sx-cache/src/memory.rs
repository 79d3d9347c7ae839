//! In-memory content cache.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::ContentCache;

/// Unbounded in-memory [`ContentCache`].
///
/// Entries live for the lifetime of the cache. Storing a key again replaces
/// the previous value; no history is kept.
#[derive(Debug, Default)]
pub struct MemoryContentCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryContentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentCache for MemoryContentCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let previous = self
            .entries
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        tracing::debug!(key, replaced = previous.is_some(), "Cached content");
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
