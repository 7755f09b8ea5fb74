//! Documentation metadata and service interfaces for Quire.
//!
//! The relational store behind documentation CRUD is external. This crate
//! defines the narrow contract the serving pipeline and the site builder
//! consume:
//!
//! - [`DocumentationMetadata`]: the per-documentation fields the pipeline reads
//! - [`DocService`]: URL resolution and build/delete job bookkeeping
//! - [`AuthService`]: source of the process-wide signing secret
//! - [`MemoryDocService`]: in-memory [`DocService`] seeded from configuration
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use quire_docs::{DocService, DocumentationMetadata, MemoryDocService};
//!
//! let docs = MemoryDocService::new().with_documentation(DocumentationMetadata {
//!     id: 42,
//!     base_url: "/docs/v1".to_owned(),
//!     build_path: PathBuf::from("data/docs-v1"),
//!     require_auth: true,
//!     token_secret: "S".to_owned(),
//! });
//!
//! let found = docs.resolve_by_url("/docs/v1/guide.html").unwrap();
//! assert_eq!(found.map(|d| d.id), Some(42));
//! ```

mod auth;
mod memory;
mod metadata;

pub use auth::AuthService;
pub use memory::MemoryDocService;
pub use metadata::DocumentationMetadata;

/// Documentation store errors.
#[derive(Debug, thiserror::Error)]
pub enum DocServiceError {
    /// No documentation with this ID.
    #[error("Documentation {0} not found")]
    NotFound(u32),

    /// The backing store could not answer.
    #[error("Documentation store unavailable: {0}")]
    Unavailable(String),
}

/// Access to documentation metadata and job state.
///
/// Implementations own the metadata; callers re-read it on every request and
/// never cache it, since fields such as `require_auth` change at any time.
pub trait DocService: Send + Sync {
    /// Find the documentation whose base URL owns `path`.
    ///
    /// Returns `Ok(None)` for paths outside every live documentation.
    /// Documentation marked for deletion is not resolved.
    fn resolve_by_url(&self, path: &str) -> Result<Option<DocumentationMetadata>, DocServiceError>;

    /// Look up a live documentation by ID.
    fn get(&self, id: u32) -> Result<Option<DocumentationMetadata>, DocServiceError>;

    /// All live documentation.
    fn list(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError>;

    /// Documentation marked for deletion whose cleanup has not run yet.
    fn pending_deletions(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError>;

    /// Record that a deletion's cache and disk cleanup finished.
    fn complete_deletion(&self, id: u32) -> Result<(), DocServiceError>;

    /// Live documentation whose source changed since its last build.
    fn pending_builds(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError>;

    /// Record that a build finished and its output is cached.
    fn complete_build(&self, id: u32) -> Result<(), DocServiceError>;
}
