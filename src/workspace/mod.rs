//! Workspace interaction: configuration, candidate storage, and the index builder.

pub mod builder;
pub mod config;
pub mod storage;

pub use builder::{CommandBuilder, IndexBuilder, WORKSPACE_PLACEHOLDER};
pub use config::{BuilderConfig, CONFIG_FILE, Config, expand_tilde};
pub use storage::{CandidateSource, DEFAULT_STORAGE_PATH, JsonFileSource};

use crate::error::Result;
use anyhow::{Context, anyhow};
use std::path::{Path, PathBuf};

/// A resolved workspace directory and its configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Resolve `path` (with tilde expansion) and load its configuration.
    pub async fn open(path: &str) -> Result<Self> {
        let expanded = expand_tilde(path);
        let root = tokio::fs::canonicalize(expanded.as_ref())
            .await
            .with_context(|| format!("Failed to resolve workspace path '{}'", path))?;

        if !root.is_dir() {
            return Err(anyhow!("Workspace is not a directory: {}", root.display()));
        }

        let config = Config::load(&root).await?;
        tracing::debug!(root = %root.display(), ?config, "Opened workspace");
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn candidate_source(&self) -> JsonFileSource {
        self.config.candidate_source(&self.root)
    }

    pub fn index_builder(&self) -> Option<CommandBuilder> {
        self.config.index_builder(&self.root)
    }
}
