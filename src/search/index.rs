//! Insertion-ordered, deduplicated pool of candidate ids.

use crate::error::LoadError;
use crate::workspace::CandidateSource;
use ahash::AHashSet;
use serde_json::Value;

/// The candidate ids available to one picker session.
///
/// Ids keep the order in which they were first seen. The index is only ever
/// replaced wholesale by [`CandidateIndex::load`]; there is no per-id mutation.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    ids: Vec<String>,
    members: AHashSet<String>,
}

impl CandidateIndex {
    /// Build an index from raw ids, dropping blanks and repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        index.extend(ids.into_iter().map(Into::into));
        index
    }

    /// Replace the contents with the ids extracted from a fetched payload.
    ///
    /// Returns `(success, count)`. A payload that could not be obtained clears the
    /// index and reports failure; a payload of an unrecognized shape loads empty
    /// but still counts as success.
    pub fn load(&mut self, payload: Result<Value, LoadError>) -> (bool, usize) {
        self.clear();
        match payload {
            Ok(value) => {
                self.extend(extract_ids(value));
                tracing::info!("Loaded {} candidate ids", self.ids.len());
                (true, self.ids.len())
            }
            Err(e) => {
                tracing::warn!("Candidate source unavailable: {}", e);
                (false, 0)
            }
        }
    }

    /// Fetch the payload from `source` and [`load`](Self::load) it.
    pub async fn load_from<S: CandidateSource>(&mut self, source: &S) -> (bool, usize) {
        let payload = source.fetch().await;
        self.load(payload)
    }

    /// Drop every candidate.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.members.clear();
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// All candidates in index order.
    pub fn all(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn extend(&mut self, ids: impl IntoIterator<Item = String>) {
        for id in ids {
            if id.trim().is_empty() || self.members.contains(&id) {
                continue;
            }
            self.members.insert(id.clone());
            self.ids.push(id);
        }
    }
}

/// Pull candidate strings out of one of the accepted payload shapes:
/// - `[..]`: every element
/// - `{"ids": [..], ..}`: every element of `ids`
/// - `{..}`: every key, then every string value
///
/// Anything else yields nothing.
fn extract_ids(payload: Value) -> Vec<String> {
    match payload {
        Value::Array(items) => items.into_iter().map(coerce).collect(),
        Value::Object(mut map) => {
            if matches!(map.get("ids"), Some(Value::Array(_)))
                && let Some(Value::Array(items)) = map.remove("ids")
            {
                return items.into_iter().map(coerce).collect();
            }
            let mut ids: Vec<String> = map.keys().cloned().collect();
            ids.extend(map.into_iter().filter_map(|(_, value)| match value {
                Value::String(s) => Some(s),
                _ => None,
            }));
            ids
        }
        _ => Vec::new(),
    }
}

/// Strings are taken verbatim; any other value uses its JSON text.
fn coerce(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;
    use std::path::PathBuf;

    fn loaded(payload: Value) -> CandidateIndex {
        let mut index = CandidateIndex::default();
        let (ok, _) = index.load(Ok(payload));
        assert!(ok);
        index
    }

    #[test]
    fn dedupes_and_drops_blanks_in_first_seen_order() {
        let index = loaded(json!(["a", "a", "", "b"]));
        check!(index.all() == ["a", "b"]);
        check!(index.size() == 2);
    }

    #[test]
    fn whitespace_only_entries_are_dropped_but_others_kept_verbatim() {
        let index = loaded(json!(["  ", " x ", "\t"]));
        check!(index.all() == [" x "]);
    }

    #[test]
    fn ids_member_matches_plain_array() {
        let wrapped = loaded(json!({"ids": ["x", "y"]}));
        let plain = loaded(json!(["x", "y"]));
        check!(wrapped.all() == plain.all());
    }

    #[test]
    fn mapping_collects_keys_then_string_values() {
        let index = loaded(json!({
            "pkg.alpha": "pkg.beta",
            "pkg.gamma": 3,
            "pkg.delta": "pkg.alpha",
        }));
        check!(index.all() == ["pkg.alpha", "pkg.gamma", "pkg.delta", "pkg.beta"]);
    }

    #[test]
    fn non_array_ids_member_falls_back_to_mapping() {
        let index = loaded(json!({"ids": "solo"}));
        check!(index.all() == ["ids", "solo"]);
    }

    #[rstest]
    #[case(json!([1, true, null, "s"]), &["1", "true", "null", "s"])]
    #[case(json!([1, "1"]), &["1"])]
    fn non_strings_are_coerced(#[case] payload: Value, #[case] expected: &[&str]) {
        let index = loaded(payload);
        check!(index.all() == expected);
    }

    #[rstest]
    #[case(json!("just a string"))]
    #[case(json!(42))]
    #[case(json!(null))]
    fn unrecognized_shapes_load_empty(#[case] payload: Value) {
        let mut index = CandidateIndex::from_ids(["stale"]);
        check!(index.load(Ok(payload)) == (true, 0));
        check!(index.is_empty());
    }

    #[test]
    fn failed_fetch_clears_instead_of_leaving_stale_ids() {
        let mut index = CandidateIndex::from_ids(["stale"]);
        let result = index.load(Err(LoadError::NotFound {
            path: PathBuf::from("storage/cached_ids.json"),
        }));
        check!(result == (false, 0));
        check!(index.is_empty());
        check!(!index.contains("stale"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let index = CandidateIndex::from_ids(["Foo"]);
        check!(index.contains("Foo"));
        check!(!index.contains("foo"));
    }
}
