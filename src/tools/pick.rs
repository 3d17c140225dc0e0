//! Interactive selection handler.

use crate::picker::{Picker, drive};
use crate::session::{Outcome, SelectionSession};
use crate::workspace::Workspace;

/// Run a selection session for `workspace` on `picker`.
///
/// The candidate index is loaded fresh for this session, with one rebuild attempt
/// through the configured index builder if it comes up empty.
pub async fn handle_pick<P: Picker>(workspace: &Workspace, picker: &mut P) -> Outcome {
    let source = workspace.candidate_source();
    let builder = workspace.index_builder();

    let mut session =
        SelectionSession::start(&source, &builder, workspace.config().cap()).await;
    let outcome = drive(&mut session, picker).await;

    if outcome.ids.is_empty() {
        tracing::info!("No ids selected");
    } else {
        tracing::info!("Selected {} id(s): {}", outcome.ids.len(), preview(&outcome.ids));
    }
    outcome
}

/// Short human-readable list: the first three ids, then a count of the rest.
pub fn preview(ids: &[String]) -> String {
    if ids.len() > 3 {
        format!("{}... (+{} more)", ids[..3].join(", "), ids.len() - 3)
    } else {
        ids.join(", ")
    }
}
