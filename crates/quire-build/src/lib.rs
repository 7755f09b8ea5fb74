//! Background site builds for Quire.
//!
//! The [`BuildCoordinator`] keeps the content cache in step with the
//! documentation registry. On every tick it:
//!
//! 1. Removes documentation marked for deletion: cache prefix first, then the
//!    build directory, then reports completion to the [`DocService`].
//! 2. Rebuilds stale documentation: cache prefix first, then the
//!    [`SiteBuilder`] writes `<build_path>/build/`, then every output file is
//!    stored in the cache with its guessed content type.
//!
//! A failed build is logged and left stale, so the next tick retries it.
//!
//! [`startup_check`] reports documentation whose build output is missing.
//!
//! [`DocService`]: quire_docs::DocService

mod builder;
mod check;
mod coordinator;
mod walk;

pub use builder::{CommandSiteBuilder, SiteBuilder};
pub use check::{StartupReport, startup_check};
pub use coordinator::{BuildCoordinator, BuildHandle, LastTick, TickSummary};

use std::path::PathBuf;

use quire_docs::DocServiceError;

/// Build and cleanup errors.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The site generator could not be started.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        /// Program name.
        command: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The site generator exited unsuccessfully.
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        /// Program name.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// Reading the build output failed.
    #[error("Failed to read {}: {source}", path.display())]
    Output {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Removing a build directory failed.
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The documentation registry failed.
    #[error(transparent)]
    Docs(#[from] DocServiceError),
}
