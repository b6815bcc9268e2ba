use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::mutation::NoteEditor;
use crate::store::DataStore;
use tracing::info;

use super::helpers::resolve_note;

/// Convert a flat note to structured blocks and store both forms.
pub fn run<S: DataStore>(store: &mut S, selector: &NoteSelector) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let mut result = CmdResult::default();

    if dn.note.is_structured() {
        result.add_message(CmdMessage::info(format!(
            "{} is already structured",
            dn.note.title
        )));
        return Ok(result);
    }

    let count = NoteEditor::open_structured(&mut dn.note).units().len();
    store.save_note(&dn.note)?;
    info!(note = %dn.note.id, blocks = count, "upgraded note");

    result.add_message(CmdMessage::success(format!(
        "Upgraded {} to {} block(s)",
        dn.note.title, count
    )));
    Ok(result.with_affected_notes(vec![dn]))
}
