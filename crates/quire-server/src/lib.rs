//! HTTP server for Quire documentation hosting.
//!
//! This crate provides the axum server in front of the built documentation
//! sites:
//! - Documentation requests: credential cascade, then cache or disk content
//! - Health and token check endpoints under `/kal-api`
//! - Admin SPA for every path outside a documentation
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (quire-server)
//!                        │
//!                        ├─► /kal-api/* (health, check_jwt)
//!                        │
//!                        └─► fallback
//!                               │
//!                               ├─► DocService::resolve_by_url
//!                               │       │
//!                               │       ├─► AccessResolver (admin cookie → visitor cookie → jwt_token)
//!                               │       └─► ContentCache ──miss──► <build_path>/build on disk
//!                               │
//!                               └─► admin SPA (no documentation matched)
//! ```
//!
//! The cache is filled by `quire-build`'s coordinator; this crate only reads
//! it.

mod access;
mod app;
mod content;
mod cookies;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use quire_build::LastTick;
use quire_cache::ContentCache;
use quire_config::{CookieConfig, CorsConfig};
use quire_docs::{AuthService, DocService};

use access::AccessResolver;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit_bytes: usize,
    /// Attributes for issued token cookies.
    pub cookies: CookieConfig,
    /// Cross-origin settings.
    pub cors: CorsConfig,
    /// Admin SPA directory.
    pub admin_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 2727,
            body_limit_bytes: 50 * 1024 * 1024,
            cookies: CookieConfig::default(),
            cors: CorsConfig::default(),
            admin_dir: PathBuf::from("web/build"),
        }
    }
}

/// Components shared with the rest of the process.
pub struct Services {
    /// Documentation registry.
    pub docs: Arc<dyn DocService>,
    /// Source of the global secret.
    pub auth: AuthService,
    /// Content cache filled by the build coordinator.
    pub cache: Arc<ContentCache>,
    /// Last build tick, reported by the health endpoint.
    pub last_tick: LastTick,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(
    config: ServerConfig,
    services: Services,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        docs: services.docs,
        auth: services.auth,
        cache: services.cache,
        access: AccessResolver::default(),
        cookies: config.cookies.clone(),
        last_tick: services.last_tick,
        admin_dir: config.admin_dir.clone(),
    });

    let app = app::create_router(state, &config);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Quire config.
#[must_use]
pub fn server_config_from_quire_config(config: &quire_config::Config) -> ServerConfig {
    let body_limit_mb = usize::try_from(config.server.body_limit_mb).unwrap_or(usize::MAX);
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        body_limit_bytes: body_limit_mb.saturating_mul(1024 * 1024),
        cookies: config.security.cookie.clone(),
        cors: config.security.cors.clone(),
        admin_dir: config.admin_resolved.dir.clone(),
    }
}
