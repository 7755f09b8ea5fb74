//! In-memory documentation registry.
//!
//! Provides [`MemoryDocService`], used by the CLI (seeded from the
//! `[[documentation]]` config entries) and by tests.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{DocService, DocServiceError, DocumentationMetadata};

#[derive(Debug)]
struct Entry {
    meta: DocumentationMetadata,
    needs_build: bool,
    deleted: bool,
}

/// In-memory [`DocService`].
///
/// Newly inserted documentation is stale until its first build completes.
#[derive(Debug, Default)]
pub struct MemoryDocService {
    entries: RwLock<BTreeMap<u32, Entry>>,
}

impl MemoryDocService {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryDocService::upsert`].
    #[must_use]
    pub fn with_documentation(self, meta: DocumentationMetadata) -> Self {
        self.upsert(meta);
        self
    }

    /// Insert or replace a documentation and mark it for rebuild.
    pub fn upsert(&self, meta: DocumentationMetadata) {
        let id = meta.id;
        self.write().insert(
            id,
            Entry {
                meta,
                needs_build: true,
                deleted: false,
            },
        );
        tracing::debug!(doc_id = id, "Documentation registered");
    }

    /// Mark a documentation's source as changed.
    pub fn mark_changed(&self, id: u32) -> Result<(), DocServiceError> {
        let mut entries = self.write();
        let entry = entries
            .get_mut(&id)
            .filter(|e| !e.deleted)
            .ok_or(DocServiceError::NotFound(id))?;
        entry.needs_build = true;
        Ok(())
    }

    /// Mark a documentation for deletion.
    ///
    /// It stops resolving immediately; cache and disk cleanup happen on the
    /// next delete pass.
    pub fn mark_deleted(&self, id: u32) -> Result<(), DocServiceError> {
        let mut entries = self.write();
        let entry = entries.get_mut(&id).ok_or(DocServiceError::NotFound(id))?;
        entry.deleted = true;
        entry.needs_build = false;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<u32, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<u32, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn collect(&self, filter: impl Fn(&Entry) -> bool) -> Vec<DocumentationMetadata> {
        self.read()
            .values()
            .filter(|e| filter(e))
            .map(|e| e.meta.clone())
            .collect()
    }
}

impl DocService for MemoryDocService {
    fn resolve_by_url(&self, path: &str) -> Result<Option<DocumentationMetadata>, DocServiceError> {
        Ok(self
            .read()
            .values()
            .filter(|e| !e.deleted && e.meta.owns_path(path))
            .max_by_key(|e| e.meta.normalized_base_url().len())
            .map(|e| e.meta.clone()))
    }

    fn get(&self, id: u32) -> Result<Option<DocumentationMetadata>, DocServiceError> {
        Ok(self
            .read()
            .get(&id)
            .filter(|e| !e.deleted)
            .map(|e| e.meta.clone()))
    }

    fn list(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError> {
        Ok(self.collect(|e| !e.deleted))
    }

    fn pending_deletions(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError> {
        Ok(self.collect(|e| e.deleted))
    }

    fn complete_deletion(&self, id: u32) -> Result<(), DocServiceError> {
        let mut entries = self.write();
        if !entries.get(&id).is_some_and(|e| e.deleted) {
            return Err(DocServiceError::NotFound(id));
        }
        entries.remove(&id);
        Ok(())
    }

    fn pending_builds(&self) -> Result<Vec<DocumentationMetadata>, DocServiceError> {
        Ok(self.collect(|e| !e.deleted && e.needs_build))
    }

    fn complete_build(&self, id: u32) -> Result<(), DocServiceError> {
        let mut entries = self.write();
        let entry = entries
            .get_mut(&id)
            .filter(|e| !e.deleted)
            .ok_or(DocServiceError::NotFound(id))?;
        entry.needs_build = false;
        Ok(())
    }
}
