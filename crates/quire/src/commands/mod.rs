//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod serve;
pub(crate) mod token;

pub(crate) use check::CheckArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use token::TokenCommand;

use quire_config::{Config, DocumentationConfig};
use quire_docs::{DocumentationMetadata, MemoryDocService};

/// Seed a registry with the `[[documentation]]` entries of `config`.
pub(crate) fn registry_from_config(config: &Config) -> MemoryDocService {
    let registry = MemoryDocService::new();
    for doc in &config.documentations_resolved {
        registry.upsert(metadata(doc));
    }
    registry
}

fn metadata(doc: &DocumentationConfig) -> DocumentationMetadata {
    DocumentationMetadata {
        id: doc.id,
        base_url: doc.base_url.clone(),
        build_path: doc.build_path.clone(),
        require_auth: doc.require_auth,
        token_secret: doc.token_secret.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use quire_docs::DocService;

    use super::*;

    #[test]
    fn test_registry_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("quire.toml");
        std::fs::write(
            &config_path,
            r#"
[data]
path = "store"

[security]
jwt_secret = "global"

[[documentation]]
id = 42
base_url = "/docs/v1"
path = "docs-v1"
require_auth = true
token_secret = "S42"
"#,
        )
        .unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();

        let registry = registry_from_config(&config);

        let doc = registry.resolve_by_url("/docs/v1/guide").unwrap().unwrap();
        assert_eq!(doc.id, 42);
        assert!(doc.require_auth);
        assert_eq!(doc.token_secret, "S42");
        assert!(doc.build_path.ends_with(Path::new("store/docs-v1")));
        assert_eq!(registry.pending_builds().unwrap().len(), 1);
    }
}
