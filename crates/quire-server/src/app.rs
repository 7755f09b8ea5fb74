//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::ServerConfig;
use crate::handlers;
use crate::middleware::{cors, recover, security};
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `config` - Server configuration (CORS, body limit)
pub(crate) fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/kal-api/health/ping", get(handlers::health::ping))
        .route(
            "/kal-api/health/last-trigger",
            get(handlers::health::last_trigger),
        )
        .route(
            "/kal-api/docs/documentation/{doc_id}/check_jwt",
            post(handlers::tokens::check_jwt),
        );

    // Documentation sites, then the admin SPA
    Router::new()
        .merge(api_routes)
        .fallback(handlers::docs::serve)
        .layer(
            ServiceBuilder::new()
                .layer(recover::recover_layer())
                .layer(TraceLayer::new_for_http())
                .layer(cors::cors_layer(&config.cors))
                .layer(security::content_type_options_layer()),
        )
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .with_state(state)
}
