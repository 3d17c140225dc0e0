//! Per-workspace configuration loaded from `idpick.toml`.

use super::builder::CommandBuilder;
use super::storage::{DEFAULT_STORAGE_PATH, JsonFileSource};
use crate::error::Result;
use crate::search::DEFAULT_CAP;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file at the workspace root.
pub const CONFIG_FILE: &str = "idpick.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Candidate payload location; relative paths resolve against the workspace root
    pub storage_path: PathBuf,
    /// Upper bound on suggestions shown at once
    pub max_suggestions: usize,
    /// Command used to rebuild the candidate payload when it is empty
    pub builder: Option<BuilderConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            max_suggestions: DEFAULT_CAP,
            builder: None,
        }
    }
}

impl Config {
    /// Load `idpick.toml` from `workspace_root`, falling back to defaults when absent.
    pub async fn load(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No {} in workspace, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Suggestion cap, never below 1.
    pub fn cap(&self) -> usize {
        self.max_suggestions.max(1)
    }

    pub fn candidate_source(&self, workspace_root: &Path) -> JsonFileSource {
        JsonFileSource::new(workspace_root.join(&self.storage_path))
    }

    pub fn index_builder(&self, workspace_root: &Path) -> Option<CommandBuilder> {
        self.builder
            .as_ref()
            .map(|b| CommandBuilder::new(&b.program, &b.args, workspace_root))
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn empty_file_is_default() {
        check!(Config::parse("").unwrap() == Config::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::parse(
            r#"
storage_path = "cache/ids.json"
max_suggestions = 20

[builder]
program = "python"
args = ["tide.py", "project", "{workspace}"]
"#,
        )
        .unwrap();

        check!(config.storage_path == PathBuf::from("cache/ids.json"));
        check!(config.cap() == 20);
        let builder = config.index_builder(Path::new("/repo")).unwrap();
        check!(builder.program() == "python");
        check!(builder.args() == ["tide.py", "project", "/repo"]);
    }

    #[rstest]
    #[case("max_suggestions = 0", 1)]
    #[case("max_suggestions = 7", 7)]
    #[case("", DEFAULT_CAP)]
    fn cap_is_at_least_one(#[case] text: &str, #[case] expected: usize) {
        check!(Config::parse(text).unwrap().cap() == expected);
    }

    #[rstest]
    #[case("storage = \"x\"")]
    #[case("max_suggestions = \"many\"")]
    #[case("[builder]\nargs = []")]
    fn rejects_malformed_config(#[case] text: &str) {
        check!(Config::parse(text).is_err());
    }

    #[tokio::test]
    async fn missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(dir.path()).await.unwrap();
        check!(config == Config::default());
        check!(
            config.candidate_source(dir.path()).path()
                == dir.path().join("storage").join("cached_ids.json")
        );
        check!(config.index_builder(dir.path()).is_none());
    }

    #[test]
    fn plain_paths_are_not_expanded() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("rel/~/path") == "rel/~/path");
    }
}
