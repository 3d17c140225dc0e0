//! Ranked suggestions over a candidate index.

use super::index::CandidateIndex;
use super::scoring::score;

/// Default number of suggestions shown in the picker.
pub const DEFAULT_CAP: usize = 50;

/// A candidate paired with its match score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub score: i64,
}

/// Produce at most `cap` suggestions for `query`, best first.
///
/// An empty query lists the first `cap` candidates in index order with score 0.
/// Otherwise non-matching candidates are dropped and the rest are ordered by
/// descending score; equal scores keep their index order.
pub fn suggest(index: &CandidateIndex, query: &str, cap: usize) -> Vec<Suggestion> {
    if query.is_empty() {
        return index
            .iter()
            .take(cap)
            .map(|id| Suggestion {
                id: id.to_string(),
                score: 0,
            })
            .collect();
    }

    let mut scored: Vec<Suggestion> = index
        .iter()
        .filter_map(|id| {
            let result = score(query, id);
            result.matches.then(|| Suggestion {
                id: id.to_string(),
                score: result.score,
            })
        })
        .collect();

    // `sort_by` is stable, which keeps index order among equal scores
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(cap);

    tracing::trace!(query, results = scored.len(), "Computed suggestions");
    scored
}
