//! Token check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use quire_token::TokenError;
use serde_json::{Value, json};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle POST /kal-api/docs/documentation/{doc_id}/check_jwt.
///
/// The request body is the raw token. It is checked against the
/// documentation's own secret, the way a visitor link would be.
pub(crate) async fn check_jwt(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
    body: String,
) -> Result<Json<Value>, ServerError> {
    let doc_id: u32 = doc_id
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("cannot parse doc_id {doc_id} as uint")))?;
    let doc = state
        .docs
        .get(doc_id)?
        .ok_or(ServerError::DocumentationNotFound(doc_id))?;

    match quire_token::validate(body.trim(), &doc.token_secret) {
        Ok(_) => Ok(Json(json!({"status": "success", "message": "valid"}))),
        Err(TokenError::Expired) => Err(ServerError::TokenExpired),
        Err(e) => {
            tracing::debug!(doc_id, error = %e, "Token check failed");
            Err(ServerError::TokenInvalid)
        }
    }
}
