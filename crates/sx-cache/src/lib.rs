//! Content cache for SX.
//!
//! Fetched content blocks are kept under a string key: the decimal form of a
//! numeric content id, or the raw path the content was requested by.
//!
//! - [`ContentCache`]: the cache interface
//! - [`MemoryContentCache`]: unbounded in-memory map, last write wins
//! - [`NullContentCache`]: no-op implementation (always misses)
//!
//! There is no expiry and no invalidation. Reloading the site model does not
//! touch cached content; deciding whether an entry is still current is up to
//! the caller.
//!
//! # Example
//!
//! ```
//! use sx_cache::{ContentCache, MemoryContentCache};
//!
//! let cache = MemoryContentCache::new();
//! cache.put("12", "<p>old</p>");
//! cache.put("12", "<p>new</p>");
//! assert_eq!(cache.get("12").as_deref(), Some("<p>new</p>"));
//! ```

mod memory;

pub use memory::MemoryContentCache;

/// Key-value store for fetched content.
pub trait ContentCache: Send + Sync {
    /// Retrieve the last value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous value for the same key.
    fn put(&self, key: &str, value: &str);

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// True if nothing is cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// No-op [`ContentCache`] that never stores anything.
///
/// Use when caching is disabled. Every lookup returns `None`.
pub struct NullContentCache;

impl ContentCache for NullContentCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&self, _key: &str, _value: &str) {}

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(NullContentCache: Send, Sync);

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullContentCache;

        cache.put("1", "hello");

        assert_eq!(cache.get("1"), None);
        assert!(cache.is_empty());
    }
}
