//! Explicit rebuild of the candidate source.

use crate::error::Result;
use crate::search::CandidateIndex;
use crate::workspace::{IndexBuilder, Workspace};
use anyhow::{Context, anyhow};

/// Run the index builder, then reload the candidates and return how many there are.
pub async fn handle_refresh(workspace: &Workspace) -> Result<usize> {
    workspace
        .index_builder()
        .build()
        .await
        .context("Failed to rebuild candidate ids")?;

    let source = workspace.candidate_source();
    let mut index = CandidateIndex::default();
    let (loaded, count) = index.load_from(&source).await;
    if !loaded {
        return Err(anyhow!(
            "Failed to load candidate ids from {}",
            source.path().display()
        ));
    }

    tracing::info!("Refreshed candidate ids, found {}", count);
    Ok(count)
}
