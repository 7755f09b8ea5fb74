//! Documentation metadata.

use std::path::PathBuf;

/// Per-documentation fields read by the serving pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentationMetadata {
    /// Documentation ID.
    pub id: u32,
    /// URL prefix the documentation is served under (e.g. `/docs/v1`).
    pub base_url: String,
    /// Project directory; the generated site lives in `build/` below it.
    pub build_path: PathBuf,
    /// Whether viewing requires a token.
    pub require_auth: bool,
    /// Secret visitor tokens for this documentation are signed with.
    pub token_secret: String,
}

impl DocumentationMetadata {
    /// Directory holding the generated site.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.build_path.join("build")
    }

    /// Check whether `path` falls under this documentation's base URL.
    ///
    /// Matches on segment boundaries: `/docs/v1` owns `/docs/v1` and
    /// `/docs/v1/guide`, but not `/docs/v10`.
    #[must_use]
    pub fn owns_path(&self, path: &str) -> bool {
        let base = self.normalized_base_url();
        if base.is_empty() {
            return path.starts_with('/');
        }
        path == base
            || path
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Base URL without a trailing slash (`""` for the root).
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(base_url: &str) -> DocumentationMetadata {
        DocumentationMetadata {
            id: 1,
            base_url: base_url.to_owned(),
            build_path: PathBuf::from("/data/doc"),
            require_auth: false,
            token_secret: "S".to_owned(),
        }
    }

    #[test]
    fn test_build_dir() {
        assert_eq!(doc("/docs").build_dir(), PathBuf::from("/data/doc/build"));
    }

    #[test]
    fn test_owns_exact_and_nested_paths() {
        let d = doc("/docs/v1");
        assert!(d.owns_path("/docs/v1"));
        assert!(d.owns_path("/docs/v1/"));
        assert!(d.owns_path("/docs/v1/guide/intro"));
    }

    #[test]
    fn test_does_not_own_sibling_prefix() {
        let d = doc("/docs/v1");
        assert!(!d.owns_path("/docs/v10"));
        assert!(!d.owns_path("/docs"));
        assert!(!d.owns_path("/admin"));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let d = doc("/docs/v1/");
        assert!(d.owns_path("/docs/v1"));
        assert!(d.owns_path("/docs/v1/guide.html"));
        assert!(!d.owns_path("/docs/v1x"));
    }

    #[test]
    fn test_root_base_url_owns_everything() {
        let d = doc("/");
        assert!(d.owns_path("/"));
        assert!(d.owns_path("/anything/at/all"));
    }
}
