//! `quire check` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_build::{StartupReport, startup_check};
use quire_config::Config;

use super::registry_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any documentation lacks a
    /// servable build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        crate::init_tracing(self.verbose, &config.server.log_level);

        let registry = registry_from_config(&config);
        let report = startup_check(&registry)?;
        print_report(&report);

        if report.is_healthy() {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} documentation(s) cannot be served",
                unservable(&report)
            )))
        }
    }
}

fn unservable(report: &StartupReport) -> usize {
    report.missing_build.len() + report.missing_index.len()
}

fn print_report(report: &StartupReport) {
    let output = Output::new();
    output.highlight("Build check");
    output.success(&format!("Ready: {}", ids(&report.ready)));
    if !report.missing_build.is_empty() {
        output.warning(&format!("Missing build/: {}", ids(&report.missing_build)));
    }
    if !report.missing_index.is_empty() {
        output.warning(&format!(
            "Missing build/index.html: {}",
            ids(&report.missing_index)
        ));
    }
}

fn ids(ids: &[u32]) -> String {
    if ids.is_empty() {
        return "none".to_owned();
    }
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
