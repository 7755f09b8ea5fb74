//! Periodic delete and build passes.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use quire_cache::{CacheKey, ContentCache};
use quire_docs::{DocService, DocumentationMetadata};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::walk::walk_files;
use crate::{BuildError, SiteBuilder, startup_check};

/// Completion time of the most recent build tick.
///
/// Cloned handles share the same slot.
#[derive(Clone, Debug, Default)]
pub struct LastTick(Arc<RwLock<Option<DateTime<Utc>>>>);

impl LastTick {
    /// Record that a tick finished now.
    pub fn record(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
    }

    /// Time of the last finished tick, if any.
    #[must_use]
    pub fn get(&self) -> Option<DateTime<Utc>> {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time of the last finished tick as RFC 3339.
    #[must_use]
    pub fn rfc3339(&self) -> Option<String> {
        self.get().map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Outcome of one tick, for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Documentation whose deletion completed.
    pub deleted: Vec<u32>,
    /// Documentation rebuilt and cached.
    pub built: Vec<u32>,
    /// Documentation whose build or cleanup failed.
    pub failed: Vec<u32>,
}

/// Keeps cached content in step with the documentation registry.
pub struct BuildCoordinator {
    docs: Arc<dyn DocService>,
    cache: Arc<ContentCache>,
    builder: Arc<dyn SiteBuilder>,
    last_tick: LastTick,
}

impl BuildCoordinator {
    /// Create a coordinator.
    #[must_use]
    pub fn new(
        docs: Arc<dyn DocService>,
        cache: Arc<ContentCache>,
        builder: Arc<dyn SiteBuilder>,
    ) -> Self {
        Self {
            docs,
            cache,
            builder,
            last_tick: LastTick::default(),
        }
    }

    /// Handle to the last tick time, for the health endpoint.
    #[must_use]
    pub fn last_tick(&self) -> LastTick {
        self.last_tick.clone()
    }

    /// Run one delete pass followed by one build pass.
    ///
    /// Blocks while the site generator runs.
    pub fn tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();
        self.delete_pass(&mut summary);
        self.build_pass(&mut summary);
        self.last_tick.record();

        if !summary.deleted.is_empty() || !summary.built.is_empty() || !summary.failed.is_empty() {
            tracing::info!(
                deleted = summary.deleted.len(),
                built = summary.built.len(),
                failed = summary.failed.len(),
                "Build tick finished"
            );
        }
        summary
    }

    fn delete_pass(&self, summary: &mut TickSummary) {
        let pending = match self.docs.pending_deletions() {
            Ok(pending) => pending,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list pending deletions");
                return;
            }
        };

        for doc in pending {
            match self.delete_one(&doc) {
                Ok(()) => summary.deleted.push(doc.id),
                Err(e) => {
                    tracing::error!(doc_id = doc.id, error = %e, "Failed to delete documentation");
                    summary.failed.push(doc.id);
                }
            }
        }
    }

    fn delete_one(&self, doc: &DocumentationMetadata) -> Result<(), BuildError> {
        // Cache before disk, so a hit never outlives the files
        let evicted = self.cache.delete_prefix(&CacheKey::prefix(doc.id));

        match std::fs::remove_dir_all(&doc.build_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(BuildError::Remove {
                    path: doc.build_path.clone(),
                    source,
                });
            }
        }

        self.docs.complete_deletion(doc.id)?;
        tracing::info!(doc_id = doc.id, evicted, "Documentation deleted");
        Ok(())
    }

    fn build_pass(&self, summary: &mut TickSummary) {
        let pending = match self.docs.pending_builds() {
            Ok(pending) => pending,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list pending builds");
                return;
            }
        };

        for doc in pending {
            match self.build_one(&doc) {
                Ok(files) => {
                    tracing::info!(doc_id = doc.id, files, "Documentation built");
                    summary.built.push(doc.id);
                }
                Err(e) => {
                    tracing::error!(doc_id = doc.id, error = %e, "Build failed");
                    summary.failed.push(doc.id);
                }
            }
        }
    }

    fn build_one(&self, doc: &DocumentationMetadata) -> Result<usize, BuildError> {
        self.cache.delete_prefix(&CacheKey::prefix(doc.id));
        self.builder.build(doc)?;
        let files = self.populate(doc)?;
        self.docs.complete_build(doc.id)?;
        Ok(files)
    }

    /// Store every file of the build output in the cache.
    fn populate(&self, doc: &DocumentationMetadata) -> Result<usize, BuildError> {
        let files = walk_files(&doc.build_dir())?;
        let count = files.len();

        for (rel, path) in files {
            let data = std::fs::read(&path).map_err(|source| BuildError::Output {
                path: path.clone(),
                source,
            })?;
            let content_type = mime_guess::from_path(&path).first_or_octet_stream();
            self.cache
                .put(CacheKey::new(doc.id, &rel), data, content_type.to_string());
        }

        Ok(count)
    }

    /// Start the background loop.
    ///
    /// Runs the startup check once, then ticks every `interval`. A slow tick
    /// delays the next one rather than stacking up.
    #[must_use]
    pub fn spawn(self: Arc<Self>, interval: Duration) -> BuildHandle {
        let (shutdown, mut stop) = watch::channel(false);

        let task = tokio::spawn(async move {
            let docs = Arc::clone(&self.docs);
            match tokio::task::spawn_blocking(move || startup_check(docs.as_ref())).await {
                Ok(Ok(report)) if !report.is_healthy() => {
                    tracing::warn!(
                        missing_build = ?report.missing_build,
                        missing_index = ?report.missing_index,
                        "Some documentation has no usable build"
                    );
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::error!(error = %e, "Startup check failed"),
                Err(e) => tracing::error!(error = %e, "Startup check panicked"),
            }

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = stop.changed() => break,
                }

                let coordinator = Arc::clone(&self);
                if let Err(e) = tokio::task::spawn_blocking(move || coordinator.tick()).await {
                    tracing::error!(error = %e, "Build tick panicked");
                }
            }

            tracing::info!("Build coordinator stopped");
        });

        BuildHandle { shutdown, task }
    }
}

/// Handle to a running [`BuildCoordinator`] loop.
pub struct BuildHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl BuildHandle {
    /// Stop the loop after the current tick finishes.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Build coordinator task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use quire_docs::MemoryDocService;

    use super::*;

    /// Builder driven by a closure.
    struct FakeBuilder<F>(F);

    impl<F> SiteBuilder for FakeBuilder<F>
    where
        F: Fn(&DocumentationMetadata) -> Result<(), BuildError> + Send + Sync,
    {
        fn build(&self, doc: &DocumentationMetadata) -> Result<(), BuildError> {
            (self.0)(doc)
        }
    }

    fn write_site(doc: &DocumentationMetadata, files: &[(&str, &str)]) {
        let build_dir = doc.build_dir();
        let _ = std::fs::remove_dir_all(&build_dir);
        for (rel, content) in files {
            let path = build_dir.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
    }

    fn doc(id: u32, root: &Path) -> DocumentationMetadata {
        DocumentationMetadata {
            id,
            base_url: format!("/d{id}"),
            build_path: root.join(format!("doc{id}")),
            require_auth: false,
            token_secret: String::new(),
        }
    }

    fn shared(docs: &Arc<MemoryDocService>) -> Arc<dyn DocService> {
        Arc::clone(docs) as Arc<dyn DocService>
    }

    fn static_site() -> Arc<dyn SiteBuilder> {
        Arc::new(FakeBuilder(|doc: &DocumentationMetadata| {
            write_site(
                doc,
                &[
                    ("index.html", "<h1>home</h1>"),
                    ("guide/intro/index.html", "<h1>intro</h1>"),
                    ("static/app.js", "console.log(1)"),
                ],
            );
            Ok(())
        }))
    }

    fn failing_site() -> Arc<dyn SiteBuilder> {
        Arc::new(FakeBuilder(|_: &DocumentationMetadata| {
            Err(BuildError::Failed {
                command: "rspress".to_owned(),
                status: "exit status: 1".to_owned(),
                stderr: "boom".to_owned(),
            })
        }))
    }

    #[test]
    fn test_build_pass_populates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let docs = Arc::new(MemoryDocService::new().with_documentation(doc(42, dir.path())));
        let cache = Arc::new(ContentCache::new());
        let coordinator = BuildCoordinator::new(shared(&docs), Arc::clone(&cache), static_site());

        let summary = coordinator.tick();

        assert_eq!(summary.built, vec![42]);
        assert_eq!(cache.len(), 3);
        let entry = cache.get("rs|doc_42|guide/intro/index.html").unwrap();
        assert_eq!(entry.data.as_ref(), b"<h1>intro</h1>");
        assert_eq!(entry.content_type, "text/html");
        let script = cache.get("rs|doc_42|static/app.js").unwrap();
        assert_eq!(script.content_type, "text/javascript");
        assert!(docs.pending_builds().unwrap().is_empty());
    }

    #[test]
    fn test_cached_bytes_match_disk() {
        let dir = tempfile::tempdir().unwrap();
        let meta = doc(1, dir.path());
        let docs = Arc::new(MemoryDocService::new().with_documentation(meta.clone()));
        let cache = Arc::new(ContentCache::new());
        BuildCoordinator::new(docs, Arc::clone(&cache), static_site()).tick();

        for (key, entry) in cache.scan_prefix(&CacheKey::prefix(1)) {
            let rel = key.trim_start_matches("rs|doc_1|");
            let on_disk = std::fs::read(meta.build_dir().join(rel)).unwrap();
            assert_eq!(entry.data.as_ref(), on_disk.as_slice(), "key {key}");
        }
    }

    #[test]
    fn test_rebuild_drops_removed_files() {
        let dir = tempfile::tempdir().unwrap();
        let docs = Arc::new(MemoryDocService::new().with_documentation(doc(1, dir.path())));
        let cache = Arc::new(ContentCache::new());
        let shrinking = Arc::new(FakeBuilder(|doc: &DocumentationMetadata| {
            write_site(doc, &[("index.html", "v2")]);
            Ok(())
        }));

        BuildCoordinator::new(shared(&docs), Arc::clone(&cache), static_site()).tick();
        docs.mark_changed(1).unwrap();
        BuildCoordinator::new(shared(&docs), Arc::clone(&cache), shrinking).tick();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("rs|doc_1|index.html").unwrap().data.as_ref(), b"v2");
    }

    #[test]
    fn test_failed_build_stays_stale_and_uncached() {
        let dir = tempfile::tempdir().unwrap();
        let docs = Arc::new(MemoryDocService::new().with_documentation(doc(1, dir.path())));
        let cache = Arc::new(ContentCache::new());
        cache.put(CacheKey::new(1, "index.html"), "old", "text/html");

        let summary =
            BuildCoordinator::new(shared(&docs), Arc::clone(&cache), failing_site()).tick();

        assert_eq!(summary.failed, vec![1]);
        assert!(cache.get("rs|doc_1|index.html").is_none());
        assert_eq!(docs.pending_builds().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_pass_clears_cache_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let gone = doc(1, dir.path());
        let kept = doc(2, dir.path());
        let docs = Arc::new(
            MemoryDocService::new()
                .with_documentation(gone.clone())
                .with_documentation(kept),
        );
        let cache = Arc::new(ContentCache::new());
        let coordinator = BuildCoordinator::new(shared(&docs), Arc::clone(&cache), static_site());
        coordinator.tick();

        docs.mark_deleted(1).unwrap();
        let summary = coordinator.tick();

        assert_eq!(summary.deleted, vec![1]);
        assert!(cache.scan_prefix(&CacheKey::prefix(1)).is_empty());
        assert_eq!(cache.scan_prefix(&CacheKey::prefix(2)).len(), 3);
        assert!(!gone.build_path.exists());
        assert!(docs.pending_deletions().unwrap().is_empty());
    }

    #[test]
    fn test_delete_without_disk_output() {
        let dir = tempfile::tempdir().unwrap();
        let docs = Arc::new(MemoryDocService::new().with_documentation(doc(1, dir.path())));
        docs.mark_deleted(1).unwrap();

        let summary =
            BuildCoordinator::new(docs, Arc::new(ContentCache::new()), static_site()).tick();

        assert_eq!(summary.deleted, vec![1]);
        assert!(summary.failed.is_empty());
    }

    #[test]
    fn test_tick_records_time() {
        let docs = Arc::new(MemoryDocService::new());
        let coordinator =
            BuildCoordinator::new(docs, Arc::new(ContentCache::new()), static_site());
        let last_tick = coordinator.last_tick();
        assert!(last_tick.get().is_none());

        coordinator.tick();

        assert!(last_tick.get().is_some());
        assert!(last_tick.rfc3339().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_spawned_loop_builds_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let docs = Arc::new(MemoryDocService::new().with_documentation(doc(7, dir.path())));
        let cache = Arc::new(ContentCache::new());
        let coordinator = Arc::new(BuildCoordinator::new(
            docs,
            Arc::clone(&cache),
            static_site(),
        ));
        let last_tick = coordinator.last_tick();

        let handle = coordinator.spawn(Duration::from_millis(20));
        for _ in 0..200 {
            if last_tick.get().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.stop().await;

        assert!(last_tick.get().is_some());
        assert!(cache.get("rs|doc_7|index.html").is_some());
    }
}
