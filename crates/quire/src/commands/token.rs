//! `quire token` command implementation.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat};
use clap::{Args, Subcommand};
use quire_config::Config;
use quire_token::{DEFAULT_TTL_HOURS, IssuedToken};

use crate::error::CliError;
use crate::output::Output;

/// Token issuing commands.
#[derive(Subcommand)]
pub(crate) enum TokenCommand {
    /// Issue an admin token, valid for every documentation.
    Admin(TokenArgs),
    /// Issue a visitor token for one documentation.
    Visitor {
        /// Documentation ID.
        #[arg(long)]
        doc: u32,

        #[command(flatten)]
        args: TokenArgs,
    },
}

/// Options shared by all token kinds.
#[derive(Args)]
pub(crate) struct TokenArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Token lifetime in hours.
    #[arg(long, default_value_t = DEFAULT_TTL_HOURS)]
    ttl_hours: u64,
}

impl TokenCommand {
    /// Execute the token command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the documentation is unknown,
    /// or signing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let issued = match self {
            Self::Admin(args) => {
                let config = Config::load(args.config.as_deref(), None)?;
                quire_token::issue_admin_token(config.global_secret(), args.ttl_hours)?
            }
            Self::Visitor { doc, args } => {
                let config = Config::load(args.config.as_deref(), None)?;
                let secret = doc_secret(&config, doc)?;
                quire_token::issue_visitor_token(secret, args.ttl_hours)?
            }
        };

        print_token(&issued);
        Ok(())
    }
}

/// Find the visitor secret of documentation `id`.
fn doc_secret(config: &Config, id: u32) -> Result<&str, CliError> {
    let doc = config
        .documentations_resolved
        .iter()
        .find(|doc| doc.id == id)
        .ok_or_else(|| CliError::Validation(format!("Documentation {id} is not configured")))?;
    if doc.token_secret.is_empty() {
        return Err(CliError::Validation(format!(
            "Documentation {id} has no token_secret"
        )));
    }
    Ok(&doc.token_secret)
}

fn print_token(issued: &IssuedToken) {
    let output = Output::new();
    output.value(&issued.token);

    let expires = i64::try_from(issued.expires_at)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true));
    match expires {
        Some(at) => output.info(&format!("Expires at {at}")),
        None => output.info(&format!("Expires at unix time {}", issued.expires_at)),
    }
}
