//! Candidate matching and ranking.
//!
//! This module provides the scoring function, the ranked suggestion list built on
//! top of it, and the candidate index both operate over.

// Module declarations
pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod suggest;

pub use index::CandidateIndex;
pub use scoring::{MatchResult, score};
pub use suggest::{DEFAULT_CAP, Suggestion, suggest};
