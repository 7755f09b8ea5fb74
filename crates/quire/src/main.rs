//! Quire CLI - documentation hosting.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server and build coordinator
//! - `token`: Issue admin or visitor tokens
//! - `check`: Report documentation that cannot be served

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ServeArgs, TokenCommand};
use output::Output;

/// Quire - documentation hosting.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// Issue access tokens.
    #[command(subcommand)]
    Token(TokenCommand),
    /// Check build output of every configured documentation.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
        Commands::Token(cmd) => cmd.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// `--verbose` forces DEBUG; otherwise `RUST_LOG` wins over the configured
/// level.
pub(crate) fn init_tracing(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
