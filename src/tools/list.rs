//! Listing of every known candidate.

use crate::search::CandidateIndex;
use crate::workspace::Workspace;

/// All candidates of the workspace in index order, one per line.
pub async fn handle_list(workspace: &Workspace) -> String {
    let mut index = CandidateIndex::default();
    let (_, count) = index.load_from(&workspace.candidate_source()).await;
    tracing::debug!("Listing {} candidates", count);

    index
        .iter()
        .flat_map(|id| [id, "\n"])
        .collect()
}
