//! Candidate payload storage.

use crate::error::LoadError;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Default payload location, relative to the workspace root.
pub const DEFAULT_STORAGE_PATH: &str = "storage/cached_ids.json";

/// Something that can hand over the raw candidate payload.
pub trait CandidateSource {
    /// Fetch and parse the payload. Absence is an error, not an empty payload.
    fn fetch(&self) -> impl Future<Output = Result<Value, LoadError>> + Send;
}

/// Candidate payload stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandidateSource for JsonFileSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(LoadError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Read candidate file");

        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_json_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cached_ids.json");
        std::fs::write(&path, r#"{"ids": ["a", "b"]}"#).unwrap();

        let payload = JsonFileSource::new(&path).fetch().await.unwrap();
        check!(payload == json!({"ids": ["a", "b"]}));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(dir.path().join("nope.json"));

        let result = source.fetch().await;
        let_assert!(Err(LoadError::NotFound { path }) = result);
        check!(path == dir.path().join("nope.json"));
    }

    #[tokio::test]
    async fn corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cached_ids.json");
        std::fs::write(&path, "[\"a\",").unwrap();

        let result = JsonFileSource::new(&path).fetch().await;
        let_assert!(Err(LoadError::Parse { .. }) = result);
    }
}
