//! CLI error types.

use quire_config::ConfigError;
use quire_docs::DocServiceError;
use quire_token::TokenError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Token(#[from] TokenError),

    #[error("{0}")]
    Docs(#[from] DocServiceError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
