//! Content resolution for documentation requests.
//!
//! A request path is mapped to a cache key and, on a miss, to files under the
//! documentation's project directory:
//!
//! ```text
//! /docs/v1/guide/intro/          request, base URL /docs/v1
//!         guide/intro            relative path, `.`/`..` resolved
//!         guide/intro/index.html cache path (no extension: index page)
//! rs|doc_42|guide/intro/index.html
//! ```
//!
//! The request path is percent-decoded segment by segment first, so keys match
//! the file names the build walked.
//!
//! Disk candidates on a miss, first regular file wins:
//!
//! 1. `<build_path>/build/<cache path>`
//! 2. `<build_path>/<relative path>`
//! 3. `<build_path>/build/index.html`

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use quire_cache::{CacheKey, ContentCache};
use quire_docs::DocumentationMetadata;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Directory the site generator writes into.
const BUILD_DIR: &str = "build";

/// Request path split into its resolved forms.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ResolvedPath {
    /// Path below the base URL with `.` and `..` resolved.
    pub(crate) relative: String,
    /// Path inside the build output, used for the cache key.
    pub(crate) cache_path: String,
}

impl ResolvedPath {
    /// Resolve `request_path` against `doc`'s base URL.
    pub(crate) fn new(doc: &DocumentationMetadata, request_path: &str) -> Self {
        let base = doc.base_url.trim_end_matches('/');
        let rest = request_path.strip_prefix(base).unwrap_or(request_path);

        let segments = resolve_segments(rest);
        let relative = segments.join("/");

        let in_build = match segments.split_first() {
            Some((first, rest)) if *first == BUILD_DIR && !rest.is_empty() => rest,
            _ => segments.as_slice(),
        };
        let mut cache_path = in_build.join("/");

        // The generator emits `guides/index.html` for a `guides.html` link
        if cache_path.ends_with("guides.html") {
            cache_path.truncate(cache_path.len() - ".html".len());
        }

        let has_extension = cache_path
            .rsplit('/')
            .next()
            .is_some_and(|last| Path::new(last).extension().is_some());
        if !has_extension {
            if cache_path.is_empty() {
                cache_path.push_str("index.html");
            } else {
                cache_path.push_str("/index.html");
            }
        }

        Self {
            relative,
            cache_path,
        }
    }

    /// Cache key for this path within `doc_id`.
    pub(crate) fn cache_key(&self, doc_id: u32) -> CacheKey {
        CacheKey::new(doc_id, &self.cache_path)
    }

    /// Files to try on a cache miss, in order.
    pub(crate) fn disk_candidates(&self, doc: &DocumentationMetadata) -> [PathBuf; 3] {
        let build_dir = doc.build_dir();
        [
            build_dir.join(&self.cache_path),
            doc.build_path.join(&self.relative),
            build_dir.join("index.html"),
        ]
    }
}

/// Percent-decode each segment of a raw URI path.
///
/// Returns `None` when a segment is not UTF-8 once decoded or decodes to a
/// `/`.
pub(crate) fn decode_path(raw: &str) -> Option<String> {
    let segments = raw
        .split('/')
        .map(|segment| {
            let decoded = percent_decode_str(segment).decode_utf8().ok()?;
            (!decoded.contains('/')).then_some(decoded)
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

/// Split `path` into segments, resolving `.` and `..` without leaving the root.
pub(crate) fn resolve_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

/// Serve decoded `path` for `doc` from the cache, falling back to disk.
///
/// `req` supplies the conditional and range headers for disk responses.
pub(crate) async fn serve(
    cache: &ContentCache,
    doc: &DocumentationMetadata,
    path: &str,
    req: Request<Body>,
) -> Response {
    let resolved = ResolvedPath::new(doc, path);
    let key = resolved.cache_key(doc.id);

    if let Some(entry) = cache.get(key.as_str()) {
        tracing::debug!(doc_id = doc.id, key = %key, "Cache hit");
        return (
            StatusCode::OK,
            [(CONTENT_TYPE, entry.content_type)],
            Body::from(entry.data),
        )
            .into_response();
    }

    let Some(file) = resolved
        .disk_candidates(doc)
        .into_iter()
        .find(|candidate| candidate.is_file())
    else {
        tracing::debug!(doc_id = doc.id, key = %key, "No content on disk");
        return StatusCode::NOT_FOUND.into_response();
    };

    tracing::debug!(doc_id = doc.id, path = %file.display(), "Serving from disk");
    match ServeFile::new(file).oneshot(req).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
