//! Admin SPA serving.
//!
//! Requests outside every documentation are served from the admin build
//! directory with an `index.html` fallback for client-side routing.

use std::path::Path;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::content::resolve_segments;

/// Path the bare root redirects to.
const ADMIN_ENTRY: &str = "/admin";

/// Serve an admin SPA asset or its `index.html` for decoded `path`.
pub(crate) async fn serve_admin(admin_dir: &Path, path: &str, req: Request) -> Response {
    if path == "/" {
        return (StatusCode::FOUND, [(LOCATION, ADMIN_ENTRY)]).into_response();
    }

    let requested = admin_dir.join(resolve_segments(path).join("/"));
    let file = if requested.is_file() {
        requested
    } else {
        admin_dir.join("index.html")
    };

    if !file.is_file() {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    match ServeFile::new(file).oneshot(req).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
