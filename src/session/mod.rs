//! Interactive selection session.
//!
//! A [`SelectionSession`] turns picker events into a list of confirmed ids. The
//! transition function is synchronous: every event returns the [`Effect`]s the
//! picker should apply next, so the session never touches a widget directly.

pub mod input;
pub mod notice;

pub use notice::Notice;

use crate::picker::{PickerEvent, PickerItem};
use crate::search::{CandidateIndex, suggest};
use crate::workspace::{CandidateSource, IndexBuilder};
use rapidfuzz::distance::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const CLOSEST_MATCH_THRESHOLD: f64 = 0.8;

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    /// Terminal: the user finished with a selection.
    Resolved(Vec<String>),
    /// Terminal: the picker was dismissed or nothing valid was submitted.
    Cancelled(Vec<String>),
}

impl SessionState {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::AwaitingInput)
    }
}

/// Instruction for the picker produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetValue(String),
    ShowItems(Vec<PickerItem>),
    SetTitle(String),
    Notify(Notice),
    Close,
}

/// Final result of a session, handed to the consumer of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Selected ids in the order they were confirmed.
    pub ids: Vec<String>,
    /// `false` when the session was cancelled (the ids may still be a partial selection).
    pub resolved: bool,
}

/// Accumulates confirmed ids from a stream of picker events.
#[derive(Debug)]
pub struct SelectionSession {
    index: CandidateIndex,
    cap: usize,
    confirmed: Vec<String>,
    pending: String,
    state: SessionState,
    /// Conditions from startup, surfaced by [`SelectionSession::open`].
    startup: Vec<Notice>,
}

impl SelectionSession {
    /// Create a session over an already-loaded index.
    pub fn new(index: CandidateIndex, cap: usize) -> Self {
        let mut session = Self {
            index,
            cap,
            confirmed: Vec::new(),
            pending: String::new(),
            state: SessionState::AwaitingInput,
            startup: Vec::new(),
        };
        if session.index.is_empty() {
            session.state = SessionState::Cancelled(Vec::new());
            session.startup.push(Notice::NoCandidates);
        }
        session
    }

    /// Load the index from `source`, rebuilding it once through `builder` when empty.
    ///
    /// If there are still no candidates the session starts out `Cancelled` with an
    /// empty selection.
    pub async fn start<S, B>(source: &S, builder: &B, cap: usize) -> Self
    where
        S: CandidateSource,
        B: IndexBuilder,
    {
        let mut index = CandidateIndex::default();
        let mut source_error = load_reporting(&mut index, source).await;

        if index.is_empty() {
            tracing::info!("No candidates loaded, attempting index rebuild");
            match builder.build().await {
                Ok(()) => source_error = load_reporting(&mut index, source).await,
                Err(e) => tracing::warn!("Index rebuild failed: {}", e),
            }
        }

        let mut session = Self::new(index, cap);
        if session.state.is_terminal()
            && let Some(reason) = source_error
        {
            session.startup.insert(0, Notice::SourceUnavailable(reason));
        }
        session
    }

    /// Effects that put a freshly shown picker into browse mode.
    ///
    /// A session that could not start yields its startup notices and closes.
    pub fn open(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.startup.drain(..).map(Effect::Notify).collect();
        if self.state.is_terminal() {
            tracing::warn!("Selection session could not start: no candidates available");
            effects.push(Effect::Close);
            return effects;
        }
        effects.push(self.title());
        effects.push(Effect::SetValue(String::new()));
        effects.push(self.items(""));
        effects
    }

    /// Advance the session by one picker event.
    ///
    /// Events after a terminal state are ignored.
    pub fn handle(&mut self, event: PickerEvent) -> Vec<Effect> {
        if self.state.is_terminal() {
            tracing::debug!(?event, "Ignoring event for finished session");
            return Vec::new();
        }
        tracing::debug!(?event, "Handling picker event");

        let mut effects = Vec::new();
        match event {
            PickerEvent::ValueChanged(text) => self.on_value_changed(text, &mut effects),
            PickerEvent::ItemAccepted(label) => self.on_accept(&label, &mut effects),
            PickerEvent::Dismissed => {
                if self.confirmed.is_empty() {
                    effects.push(Effect::Notify(Notice::EmptySubmission));
                }
                self.state = SessionState::Cancelled(self.confirmed.clone());
            }
        }

        if self.state.is_terminal() {
            tracing::info!(state = ?self.state, "Selection session finished");
            effects.push(Effect::Close);
        }
        effects
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Ids confirmed so far, in confirmation order.
    pub fn confirmed(&self) -> &[String] {
        &self.confirmed
    }

    /// The picker text as last seen by the session.
    pub fn pending_text(&self) -> &str {
        &self.pending
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    /// The final result, once the session is terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.state {
            SessionState::AwaitingInput => None,
            SessionState::Resolved(ids) => Some(Outcome {
                ids: ids.clone(),
                resolved: true,
            }),
            SessionState::Cancelled(ids) => Some(Outcome {
                ids: ids.clone(),
                resolved: false,
            }),
        }
    }

    fn on_value_changed(&mut self, text: String, effects: &mut Vec<Effect>) {
        let Some(before) = input::strip_delimiter(&text) else {
            effects.push(self.items(input::live_query(&text)));
            self.pending = text;
            return;
        };

        let id = self.resolve(input::last_segment(before));
        if self.index.contains(id) && !self.is_confirmed(id) {
            let id = id.to_string();
            self.confirm(id, effects);
            self.reset_to_browse(effects);
            return;
        }

        // Reject the delimiter: the segment is blank, unknown, or a repeat
        if !id.is_empty() {
            effects.push(Effect::Notify(self.rejection(id)));
        }
        let stripped = before.to_string();
        effects.push(Effect::SetValue(stripped.clone()));
        effects.push(self.items(input::live_query(&stripped)));
        self.pending = stripped;
    }

    fn on_accept(&mut self, label: &str, effects: &mut Vec<Effect>) {
        let text = std::mem::take(&mut self.pending);
        let label = self.resolve(label);

        if text.trim().is_empty() {
            if label.is_empty() {
                self.finish(effects);
            } else {
                self.accept_and_continue(label, &text, effects);
            }
            return;
        }

        if !text.contains(input::DELIMITER) {
            let typed = self.resolve(&text);
            if self.index.contains(typed) {
                // Single-shot confirmation of a fully typed id
                let typed = typed.to_string();
                self.append(typed);
                self.state = SessionState::Resolved(self.confirmed.clone());
                return;
            }
            if !label.is_empty() {
                self.accept_and_continue(label, &text, effects);
                return;
            }
        }

        self.submit(&text, label, effects);
    }

    /// Confirm a highlighted suggestion and go back to browse mode.
    fn accept_and_continue(&mut self, label: &str, text: &str, effects: &mut Vec<Effect>) {
        if !self.index.contains(label) {
            effects.push(Effect::Notify(self.rejection(label)));
            self.pending = text.to_string();
            return;
        }
        if self.is_confirmed(label) {
            effects.push(Effect::Notify(Notice::AlreadySelected(label.to_string())));
        } else {
            self.confirm(label.to_string(), effects);
        }
        self.reset_to_browse(effects);
    }

    /// Final submission of typed `+`-delimited ids.
    ///
    /// An accepted suggestion stands in for an unfinished live query. Unknown ids
    /// are reported and skipped; if none are valid the session is cancelled empty.
    fn submit(&mut self, text: &str, label: &str, effects: &mut Vec<Effect>) {
        let mut segments: Vec<&str> = input::segments(text)
            .into_iter()
            .map(|segment| self.resolve(segment))
            .collect();
        if segments.is_empty() {
            self.finish(effects);
            return;
        }

        let ends_open = !text.trim_end().ends_with(input::DELIMITER);
        if ends_open
            && !label.is_empty()
            && let Some(last) = segments.last_mut()
            && !self.index.contains(last)
        {
            *last = label;
        }

        let mut any_valid = false;
        for segment in segments {
            if self.index.contains(segment) {
                any_valid = true;
                self.append(segment.to_string());
            } else {
                tracing::warn!(id = segment, "Ignoring unknown id in submission");
                effects.push(Effect::Notify(self.rejection(segment)));
            }
        }

        if any_valid {
            self.state = SessionState::Resolved(self.confirmed.clone());
        } else {
            effects.push(Effect::Notify(Notice::EmptySubmission));
            self.state = SessionState::Cancelled(Vec::new());
        }
    }

    /// Accept with nothing typed: done adding ids.
    fn finish(&mut self, effects: &mut Vec<Effect>) {
        if self.confirmed.is_empty() {
            effects.push(Effect::Notify(Notice::EmptySubmission));
            self.state = SessionState::Cancelled(Vec::new());
        } else {
            self.state = SessionState::Resolved(self.confirmed.clone());
        }
    }

    fn confirm(&mut self, id: String, effects: &mut Vec<Effect>) {
        let notice = Notice::Selected {
            id: id.clone(),
            total: self.confirmed.len() + 1,
        };
        if self.append(id) {
            effects.push(Effect::Notify(notice));
            effects.push(self.title());
        }
    }

    /// Append `id` unless already confirmed. Returns whether it was added.
    fn append(&mut self, id: String) -> bool {
        if self.is_confirmed(&id) {
            return false;
        }
        tracing::debug!(id = %id, "Confirmed id");
        self.confirmed.push(id);
        true
    }

    /// `raw` if it is a candidate as typed, otherwise `raw` trimmed.
    ///
    /// Candidates keep their surrounding whitespace, so a padded id only matches verbatim.
    fn resolve<'a>(&self, raw: &'a str) -> &'a str {
        if self.index.contains(raw) {
            raw
        } else {
            raw.trim()
        }
    }

    fn is_confirmed(&self, id: &str) -> bool {
        self.confirmed.iter().any(|c| c == id)
    }

    fn reset_to_browse(&mut self, effects: &mut Vec<Effect>) {
        self.pending.clear();
        effects.push(Effect::SetValue(String::new()));
        effects.push(self.items(""));
    }

    fn rejection(&self, id: &str) -> Notice {
        if self.index.contains(id) {
            Notice::AlreadySelected(id.to_string())
        } else {
            Notice::InvalidSelection {
                id: id.to_string(),
                closest: self.closest(id),
            }
        }
    }

    /// The most similar candidate, if it is similar enough to suggest.
    fn closest(&self, id: &str) -> Option<String> {
        self.index
            .iter()
            .map(|candidate| {
                (
                    candidate,
                    jaro_winkler::similarity(id.chars(), candidate.chars()),
                )
            })
            .filter(|(_, score)| *score >= CLOSEST_MATCH_THRESHOLD)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(candidate, _)| candidate.to_string())
    }

    fn items(&self, query: &str) -> Effect {
        let items = suggest(&self.index, query, self.cap)
            .into_iter()
            .map(|s| PickerItem {
                annotation: (!query.is_empty() && s.score > 0)
                    .then(|| format!("Score: {}", s.score)),
                label: s.id,
            })
            .collect();
        Effect::ShowItems(items)
    }

    fn title(&self) -> Effect {
        Effect::SetTitle(format!(
            "Select IDs ({} available, {} selected)",
            self.index.size(),
            self.confirmed.len()
        ))
    }
}

/// Load `source` into `index`, returning the failure reason if the fetch failed.
async fn load_reporting<S: CandidateSource>(
    index: &mut CandidateIndex,
    source: &S,
) -> Option<String> {
    let payload = source.fetch().await;
    let reason = payload.as_ref().err().map(ToString::to_string);
    index.load(payload);
    reason
}
