//! Startup consistency check.

use quire_docs::{DocService, DocServiceError};

/// Build output state of every live documentation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Documentation with a usable build.
    pub ready: Vec<u32>,
    /// Documentation without a `build/` directory.
    pub missing_build: Vec<u32>,
    /// Documentation whose `build/` has no `index.html`.
    pub missing_index: Vec<u32>,
}

impl StartupReport {
    /// Whether every documentation has a usable build.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.missing_build.is_empty() && self.missing_index.is_empty()
    }
}

/// Inspect build directories and report the ones that cannot be served.
///
/// Nothing is rebuilt here; stale documentation is picked up by the
/// coordinator's build pass.
pub fn startup_check(docs: &dyn DocService) -> Result<StartupReport, DocServiceError> {
    let mut report = StartupReport::default();

    for doc in docs.list()? {
        let build_dir = doc.build_dir();
        if !build_dir.is_dir() {
            tracing::warn!(doc_id = doc.id, path = %build_dir.display(), "Build directory missing");
            report.missing_build.push(doc.id);
        } else if !build_dir.join("index.html").is_file() {
            tracing::warn!(doc_id = doc.id, path = %build_dir.display(), "Build has no index.html");
            report.missing_index.push(doc.id);
        } else {
            report.ready.push(doc.id);
        }
    }

    tracing::info!(
        ready = report.ready.len(),
        missing = report.missing_build.len() + report.missing_index.len(),
        "Startup check finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use quire_docs::{DocumentationMetadata, MemoryDocService};

    use super::*;

    fn doc(id: u32, root: &Path) -> DocumentationMetadata {
        DocumentationMetadata {
            id,
            base_url: format!("/d{id}"),
            build_path: root.join(format!("doc{id}")),
            require_auth: false,
            token_secret: String::new(),
        }
    }

    #[test]
    fn test_reports_each_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("doc1/build")).unwrap();
        std::fs::write(dir.path().join("doc1/build/index.html"), "ok").unwrap();
        std::fs::create_dir_all(dir.path().join("doc2/build")).unwrap();
        std::fs::create_dir_all(dir.path().join("doc3")).unwrap();

        let docs = MemoryDocService::new()
            .with_documentation(doc(1, dir.path()))
            .with_documentation(doc(2, dir.path()))
            .with_documentation(doc(3, dir.path()));

        let report = startup_check(&docs).unwrap();

        assert_eq!(
            report,
            StartupReport {
                ready: vec![1],
                missing_build: vec![3],
                missing_index: vec![2],
            }
        );
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_empty_registry_is_healthy() {
        let report = startup_check(&MemoryDocService::new()).unwrap();
        assert!(report.is_healthy());
    }
}
