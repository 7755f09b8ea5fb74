//! Site generator invocation.

use std::process::Command;

use quire_docs::DocumentationMetadata;

use crate::BuildError;

/// Produces a documentation's static site in `<build_path>/build/`.
///
/// Called from a blocking thread; implementations may block.
pub trait SiteBuilder: Send + Sync {
    /// Build the site for `doc`.
    fn build(&self, doc: &DocumentationMetadata) -> Result<(), BuildError>;
}

/// Runs an external generator (e.g. `npx rspress build`) inside the
/// documentation's project directory.
#[derive(Clone, Debug)]
pub struct CommandSiteBuilder {
    program: String,
    args: Vec<String>,
}

impl CommandSiteBuilder {
    /// Create a builder from a command line.
    ///
    /// Returns `None` when `command` is empty.
    #[must_use]
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl SiteBuilder for CommandSiteBuilder {
    fn build(&self, doc: &DocumentationMetadata) -> Result<(), BuildError> {
        tracing::debug!(doc_id = doc.id, program = %self.program, "Running site generator");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&doc.build_path)
            .output()
            .map_err(|source| BuildError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BuildError::Failed {
                command: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(())
    }
}
