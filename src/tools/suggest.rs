//! One-shot ranked suggestions for a query.

use crate::search::{CandidateIndex, suggest};
use crate::workspace::Workspace;

/// Rank the workspace's candidates against `query`.
///
/// `limit` defaults to the configured suggestion cap. Returns one `score<TAB>id` line per suggestion, best first. A missing or
/// corrupt candidate file yields no lines.
pub async fn handle_suggest(workspace: &Workspace, query: &str, limit: Option<usize>) -> String {
    let limit = limit.unwrap_or_else(|| workspace.config().cap());
    let mut index = CandidateIndex::default();
    index.load_from(&workspace.candidate_source()).await;

    suggest(&index, query.trim(), limit)
        .into_iter()
        .map(|s| format!("{}\t{}\n", s.score, s.id))
        .collect()
}
