//! External index builder invocation.

use crate::error::BuildError;
use std::future::Future;
use std::path::Path;

/// Placeholder replaced by the workspace path in builder arguments.
pub const WORKSPACE_PLACEHOLDER: &str = "{workspace}";

/// An operation that (re)populates the candidate source.
///
/// Only the completion signal matters; any output is discarded.
pub trait IndexBuilder {
    fn build(&self) -> impl Future<Output = Result<(), BuildError>> + Send;
}

/// Absent builder: recovery is attempted but always reports [`BuildError::NotConfigured`].
impl<B: IndexBuilder + Sync> IndexBuilder for Option<B> {
    async fn build(&self) -> Result<(), BuildError> {
        match self {
            Some(builder) => builder.build().await,
            None => Err(BuildError::NotConfigured),
        }
    }
}

/// Runs an external program to rebuild the candidate source.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
}

impl CommandBuilder {
    /// Create a builder, substituting [`WORKSPACE_PLACEHOLDER`] in `args` with `workspace`.
    pub fn new(program: impl Into<String>, args: &[String], workspace: &Path) -> Self {
        let workspace = workspace.display().to_string();
        Self {
            program: program.into(),
            args: args
                .iter()
                .map(|arg| arg.replace(WORKSPACE_PLACEHOLDER, &workspace))
                .collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl IndexBuilder for CommandBuilder {
    async fn build(&self) -> Result<(), BuildError> {
        tracing::info!(program = %self.program, args = ?self.args, "Running index builder");
        let start = std::time::Instant::now();

        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                program = %self.program,
                stderr = %stderr,
                "Index builder failed"
            );
            return Err(BuildError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        tracing::debug!("Index builder completed in {:?}", start.elapsed());
        Ok(())
    }
}
