use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;
use tracing::info;

use super::helpers::resolve_notes;

/// Permanently delete notes, attachments included.
pub fn run<S: DataStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    // An empty selector list would mean "all notes"; never delete by default.
    if selectors.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No notes selected."));
        return Ok(result);
    }

    let notes = resolve_notes(store, selectors)?;
    let mut result = CmdResult::default();
    for dn in &notes {
        store.delete_note(&dn.note.id)?;
        info!(note = %dn.note.id, "deleted note");
        result.add_message(CmdMessage::success(format!("Deleted: {}", dn.note.title)));
    }
    Ok(result.with_affected_notes(notes))
}
