//! Match scoring between a typed query and a single candidate id.
//!
//! Contiguous substring hits always outrank subsequence hits of the same query:
//! the substring score starts at 100 while the subsequence score only grows with
//! the number of matched characters.

/// Base score awarded to any contiguous substring match.
const SUBSTRING_BASE: i64 = 100;

/// Weight applied to each character of a contiguous substring match.
const SUBSTRING_CHAR_WEIGHT: i64 = 10;

/// Bonus applied per character of the longest consecutive run in a subsequence match.
const RUN_BONUS: i64 = 5;

/// Outcome of scoring one candidate against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Relevance score; `-1` when `matches` is false.
    pub score: i64,
    pub matches: bool,
}

impl MatchResult {
    /// Sentinel for a candidate that was scored and did not match.
    pub const MISS: Self = Self {
        score: -1,
        matches: false,
    };

    const fn hit(score: i64) -> Self {
        Self {
            score,
            matches: true,
        }
    }
}

/// Score `candidate` against `query`, ignoring ASCII case.
///
/// Scoring:
/// - Empty query: every candidate matches with score 0
/// - Substring at char offset `pos`: `100 + 10*len(query) - pos - (len(candidate) - len(query))`
/// - Ordered subsequence: `sum(1 + run) + 5 * longest_run`, where `run` is the length of
///   the consecutive streak ending at each matched character
/// - Otherwise: [`MatchResult::MISS`]
pub fn score(query: &str, candidate: &str) -> MatchResult {
    if query.is_empty() {
        return MatchResult::hit(0);
    }

    let query: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();
    let candidate: Vec<char> = candidate.chars().map(|c| c.to_ascii_lowercase()).collect();

    if let Some(pos) = find_substring(&candidate, &query) {
        let query_len = len_i64(query.len());
        let candidate_len = len_i64(candidate.len());
        return MatchResult::hit(
            SUBSTRING_BASE + SUBSTRING_CHAR_WEIGHT * query_len
                - len_i64(pos)
                - (candidate_len - query_len),
        );
    }

    subsequence_score(&query, &candidate)
}

/// Char offset of the first occurrence of `needle` in `haystack`.
fn find_substring(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn subsequence_score(query: &[char], candidate: &[char]) -> MatchResult {
    let mut cursor = 0;
    let mut consecutive: i64 = 0;
    let mut max_consecutive: i64 = 0;
    let mut score: i64 = 0;

    for &c in candidate {
        if cursor == query.len() {
            break;
        }
        if c == query[cursor] {
            consecutive += 1;
            max_consecutive = max_consecutive.max(consecutive);
            score += 1 + consecutive;
            cursor += 1;
        } else {
            consecutive = 0;
        }
    }

    if cursor == query.len() {
        MatchResult::hit(score + max_consecutive * RUN_BONUS)
    } else {
        MatchResult::MISS
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn len_i64(len: usize) -> i64 {
    len as i64
}
