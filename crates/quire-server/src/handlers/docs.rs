//! Documentation serving.
//!
//! Every request no API route claims lands here. Paths owned by a
//! documentation go through the credential cascade and then content
//! resolution; all others fall through to the admin SPA.

use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::access::Credentials;
use crate::content;
use crate::cookies::{VISITOR_COOKIE, token_cookie};
use crate::error::ServerError;
use crate::state::AppState;
use crate::static_files;

/// Query parameter carrying a visitor token.
const TOKEN_PARAM: &str = "jwt_token";

/// First `jwt_token` value of the query string, if any.
fn query_token(uri: &Uri) -> Option<String> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .find_map(|(key, value)| (key == TOKEN_PARAM).then_some(value)),
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable query string");
            None
        }
    }
}

/// Serve a documentation file or the admin SPA.
pub(crate) async fn serve(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let Some(path) = content::decode_path(req.uri().path()) else {
        tracing::warn!(path = %req.uri().path(), "Malformed request path");
        return ServerError::BadRequest("malformed request path".to_owned()).into_response();
    };

    let doc = match state.docs.resolve_by_url(&path) {
        Ok(Some(doc)) => doc,
        Ok(None) => return static_files::serve_admin(&state.admin_dir, &path, req).await,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Documentation lookup failed");
            return ServerError::MetadataLookup(e).into_response();
        }
    };

    let verdict = {
        let credentials = Credentials::from_headers(req.headers(), query_token(req.uri()));
        state.access.resolve(&credentials, &doc, &state.auth)
    };

    let Some(reason) = verdict.reason else {
        tracing::error!(doc_id = doc.id, path = %path, "Unauthorized documentation request");
        return ServerError::Unauthorized.into_response();
    };
    tracing::debug!(doc_id = doc.id, reason = reason.as_str(), "Access granted");

    let response = content::serve(&state.cache, &doc, &path, req).await;

    match verdict.visitor_token {
        Some(issued) => {
            let cookie = token_cookie(VISITOR_COOKIE, issued.token, &state.cookies);
            (CookieJar::new().add(cookie), response).into_response()
        }
        None => response,
    }
}
