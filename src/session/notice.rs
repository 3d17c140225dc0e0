//! User-visible conditions raised while a session runs.

use std::fmt;

/// Informational or warning message for the person driving the picker.
///
/// None of these are errors; each accompanies a well-defined session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No candidates even after the rebuild attempt.
    NoCandidates,
    /// The candidate payload could not be obtained.
    SourceUnavailable(String),
    /// A typed id is not a candidate.
    InvalidSelection { id: String, closest: Option<String> },
    /// The id was already confirmed; nothing changed.
    AlreadySelected(String),
    /// The session ended with nothing selected.
    EmptySubmission,
    /// An id was confirmed.
    Selected { id: String, total: usize },
}

impl Notice {
    pub const fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NoCandidates | Self::SourceUnavailable(_) | Self::InvalidSelection { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates => write!(f, "No candidates available"),
            Self::SourceUnavailable(reason) => write!(f, "Candidate source unavailable: {}", reason),
            Self::InvalidSelection {
                id,
                closest: Some(closest),
            } => write!(f, "Unknown id '{}' (did you mean '{}'?)", id, closest),
            Self::InvalidSelection { id, closest: None } => write!(f, "Unknown id '{}'", id),
            Self::AlreadySelected(id) => write!(f, "'{}' is already selected", id),
            Self::EmptySubmission => write!(f, "No ids selected"),
            Self::Selected { id, total } => write!(f, "Selected '{}' ({} total)", id, total),
        }
    }
}
