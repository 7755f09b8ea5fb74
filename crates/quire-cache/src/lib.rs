//! In-memory content cache for Quire.
//!
//! This crate provides the cache shared between the background site builder
//! and the request handlers:
//!
//! - [`ContentCache`]: Concurrent map from [`CacheKey`] strings to [`CacheEntry`] values
//! - [`CacheKey`]: Namespaced key for one file of one documentation
//!
//! Entries never expire. The only removal path is explicit prefix deletion,
//! which the builder runs before it rebuilds or deletes a documentation.
//!
//! # Example
//!
//! ```
//! use quire_cache::{CacheKey, ContentCache};
//!
//! let cache = ContentCache::new();
//! cache.put(CacheKey::new(42, "guide.html"), "<html></html>", "text/html");
//! assert!(cache.get("rs|doc_42|guide.html").is_some());
//!
//! cache.delete_prefix(&CacheKey::prefix(42));
//! assert!(cache.get("rs|doc_42|guide.html").is_none());
//! ```

mod key;

use std::collections::HashMap;

use bytes::Bytes;
use dashmap::DashMap;

pub use key::CacheKey;

/// A cached file.
///
/// Entries are immutable: a rebuild replaces the whole entry, it never
/// patches one in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// File contents.
    pub data: Bytes,
    /// MIME type sent as `Content-Type`.
    pub content_type: String,
}

/// Concurrent content cache.
///
/// Internally sharded, so callers never lock. A reader either sees the
/// previous entry for a key or the new one, never a partial write.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: DashMap<String, CacheEntry>,
}

impl ContentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        tracing::info!("Content cache initialized");
        Self::default()
    }

    /// Look up an entry.
    ///
    /// Returns `None` if the key was never stored or has been deleted.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store an entry, replacing any existing one for the same key.
    pub fn put(
        &self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data: data.into(),
                content_type: content_type.into(),
            },
        );
    }

    /// Remove every entry whose key starts with `prefix`.
    ///
    /// Returns the number of removed entries.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before.saturating_sub(self.entries.len());
        tracing::debug!(prefix, removed, "Cleared cache prefix");
        removed
    }

    /// Copy out every entry whose key starts with `prefix`.
    pub fn scan_prefix(&self, prefix: &str) -> HashMap<String, CacheEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Used on shutdown.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
