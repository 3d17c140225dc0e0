pub mod cli;
pub mod error;
pub mod picker;
pub mod search;
pub mod session;
pub mod tools;
pub mod tracing;
pub mod workspace;

pub use picker::{LinePicker, Picker, PickerEvent, PickerItem, drive};
pub use search::{CandidateIndex, MatchResult, Suggestion, score, suggest};
pub use session::{Effect, Notice, Outcome, SelectionSession, SessionState};
pub use workspace::{CandidateSource, CommandBuilder, Config, IndexBuilder, JsonFileSource, Workspace};
