//! Cache key formatting.

use std::fmt;

/// Key identifying one servable file of one documentation.
///
/// Formatted as `rs|doc_<ID>|<relative-path>`, with any leading `/` of the
/// relative path stripped. Path normalization happens before the key is
/// built; this type only owns the namespace layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for `relative_path` within documentation `doc_id`.
    #[must_use]
    pub fn new(doc_id: u32, relative_path: &str) -> Self {
        let relative_path = relative_path.trim_start_matches('/');
        Self(format!("{}{relative_path}", Self::prefix(doc_id)))
    }

    /// Prefix shared by every key of documentation `doc_id`.
    #[must_use]
    pub fn prefix(doc_id: u32) -> String {
        format!("rs|doc_{doc_id}|")
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}
