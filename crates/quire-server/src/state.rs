//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use quire_build::LastTick;
use quire_cache::ContentCache;
use quire_config::CookieConfig;
use quire_docs::{AuthService, DocService};

use crate::access::AccessResolver;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Documentation registry, consulted on every request.
    pub(crate) docs: Arc<dyn DocService>,
    /// Source of the global secret.
    pub(crate) auth: AuthService,
    /// Built site content.
    pub(crate) cache: Arc<ContentCache>,
    /// Credential cascade.
    pub(crate) access: AccessResolver,
    /// Attributes for issued token cookies.
    pub(crate) cookies: CookieConfig,
    /// Completion time of the last build tick.
    pub(crate) last_tick: LastTick,
    /// Admin SPA directory.
    pub(crate) admin_dir: PathBuf,
}
