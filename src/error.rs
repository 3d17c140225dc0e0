//! Error handling types and utilities.

use std::path::PathBuf;
use std::process::ExitStatus;

/// A specialized Result type for idpick operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the candidate payload cannot be obtained.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No payload at the expected location.
    #[error("candidate file not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// The payload exists but could not be read.
    #[error("failed to read candidate file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload was read but is not valid JSON.
    #[error("failed to parse candidate file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when the external index builder cannot repopulate the source.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// No builder command is configured for this workspace.
    #[error("no index builder configured")]
    NotConfigured,
    /// The builder process could not be started.
    #[error("failed to start index builder '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The builder ran but exited unsuccessfully.
    #[error("index builder '{program}' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
