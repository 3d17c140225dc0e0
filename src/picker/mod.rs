//! Picker widget capability and the loop that drives a session with it.
//!
//! Any list-input surface that can show an editable value plus a list of items,
//! and report value changes, accepts, and dismissals, can host a session.

pub mod line;

pub use line::LinePicker;

use crate::session::{Effect, Notice, Outcome, SelectionSession};
use std::future::Future;

/// Event raised by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The editable text now reads this value.
    ValueChanged(String),
    /// The highlighted item (or nothing, as `""`) was explicitly accepted.
    ItemAccepted(String),
    /// The picker was closed without accepting.
    Dismissed,
}

/// One row of the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub annotation: Option<String>,
}

/// A list-input surface a session can be shown on.
pub trait Picker {
    /// Wait for the next user event. `None` means the event stream ended.
    fn next_event(&mut self) -> impl Future<Output = Option<PickerEvent>>;

    fn value(&self) -> &str;

    fn set_value(&mut self, value: &str);

    fn set_items(&mut self, items: Vec<PickerItem>);

    fn set_title(&mut self, title: &str);

    fn notify(&mut self, notice: &Notice);

    /// Hide the picker. Must tolerate repeated calls.
    fn close(&mut self);
}

/// Run `session` on `picker` until it reaches a terminal state.
///
/// A picker whose event stream ends is treated as dismissed.
pub async fn drive<P: Picker>(session: &mut SelectionSession, picker: &mut P) -> Outcome {
    apply(picker, session.open());

    loop {
        if let Some(outcome) = session.outcome() {
            tracing::info!(
                selected = outcome.ids.len(),
                resolved = outcome.resolved,
                "Picker session ended"
            );
            return outcome;
        }

        let event = match picker.next_event().await {
            Some(event) => event,
            None => {
                tracing::debug!("Picker event stream ended, treating as dismissal");
                PickerEvent::Dismissed
            }
        };
        let effects = session.handle(event);
        apply(picker, effects);
    }
}

/// Apply transition effects to the picker in order.
pub fn apply<P: Picker>(picker: &mut P, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::SetValue(value) => picker.set_value(&value),
            Effect::ShowItems(items) => picker.set_items(items),
            Effect::SetTitle(title) => picker.set_title(&title),
            Effect::Notify(notice) => picker.notify(&notice),
            Effect::Close => picker.close(),
        }
    }
}
