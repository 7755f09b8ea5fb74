//! Health endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// Handle GET /kal-api/health/ping.
pub(crate) async fn ping() -> Json<Value> {
    Json(json!({"status": "success", "message": "pong"}))
}

/// Handle GET /kal-api/health/last-trigger.
///
/// Reports when the build coordinator last finished a tick, or `null` before
/// the first one.
pub(crate) async fn last_trigger(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"status": "success", "message": state.last_tick.rfc3339()}))
}
