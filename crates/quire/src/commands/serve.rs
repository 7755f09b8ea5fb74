//! `quire serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use quire_build::{BuildCoordinator, CommandSiteBuilder};
use quire_cache::ContentCache;
use quire_config::{CliSettings, Config};
use quire_docs::{AuthService, DocService};
use quire_server::{Services, run_server, server_config_from_quire_config};

use super::registry_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Data directory holding documentation projects (overrides config).
    #[arg(long, env = "QUIRE_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_path: self.data_path,
            log_level: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        crate::init_tracing(self.verbose, &config.server.log_level);

        std::fs::create_dir_all(&config.data_resolved.path).map_err(|e| {
            CliError::Server(format!(
                "Failed to create data directory {}: {e}",
                config.data_resolved.path.display()
            ))
        })?;

        let builder = CommandSiteBuilder::new(&config.build.command)
            .ok_or_else(|| CliError::Validation("build.command cannot be empty".to_owned()))?;
        let docs: Arc<dyn DocService> = Arc::new(registry_from_config(&config));
        let cache = Arc::new(ContentCache::new());

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Data directory: {}",
            config.data_resolved.path.display()
        ));
        output.info(&format!(
            "Documentation: {} configured, build every {}s",
            config.documentations_resolved.len(),
            config.build.interval_secs
        ));

        let coordinator = Arc::new(BuildCoordinator::new(
            Arc::clone(&docs),
            Arc::clone(&cache),
            Arc::new(builder),
        ));
        let last_tick = coordinator.last_tick();
        let handle = coordinator.spawn(Duration::from_secs(config.build.interval_secs));

        let services = Services {
            docs,
            auth: AuthService::new(config.global_secret()),
            cache: Arc::clone(&cache),
            last_tick,
        };
        let result = run_server(server_config_from_quire_config(&config), services)
            .await
            .map_err(|e| CliError::Server(e.to_string()));

        handle.stop().await;
        cache.clear();
        tracing::info!("Build coordinator stopped, cache drained");

        result
    }
}
