//! Parsing of the picker's free text as `+`-delimited ids.
//!
//! `pkg.a+pkg.b+mo` holds two typed ids followed by the live query `mo`.

/// Separator between typed ids.
pub const DELIMITER: char = '+';

/// The text before a trailing delimiter, if the text ends with one.
pub fn strip_delimiter(text: &str) -> Option<&str> {
    text.strip_suffix(DELIMITER)
}

/// The raw text after the last delimiter, or the whole text.
pub fn last_segment(text: &str) -> &str {
    text.rsplit(DELIMITER).next().unwrap_or(text)
}

/// The trimmed text after the last delimiter, used to rank suggestions.
pub fn live_query(text: &str) -> &str {
    last_segment(text).trim()
}

/// Every non-blank segment, untrimmed, in typed order.
pub fn segments(text: &str) -> Vec<&str> {
    text.split(DELIMITER)
        .filter(|s| !s.trim().is_empty())
        .collect()
}
