//! Content mutations: edit, append, move and remove.
//!
//! Each one opens a [`crate::mutation::NoteEditor`] on the selected note,
//! applies a single mutation, and stores the note with its re-serialized content.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;

use super::helpers::{open_editor, resolve_note};

pub fn edit<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    index: usize,
    content: String,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    open_editor(&mut dn.note, upgrade).edit(index, content)?;
    store.save_note(&dn.note)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated unit {}", index)));
    Ok(result.with_affected_notes(vec![dn]))
}

pub fn append<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    content: String,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    open_editor(&mut dn.note, upgrade).insert_text(content);
    store.save_note(&dn.note)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Text appended"));
    Ok(result.with_affected_notes(vec![dn]))
}

pub fn move_unit<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    from: usize,
    to: usize,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let moved = open_editor(&mut dn.note, upgrade).reorder(from, to);

    let mut result = CmdResult::default();
    if moved {
        store.save_note(&dn.note)?;
        result.add_message(CmdMessage::success(format!("Moved unit {} to {}", from, to)));
        Ok(result.with_affected_notes(vec![dn]))
    } else {
        result.add_message(CmdMessage::info("Nothing to move."));
        Ok(result)
    }
}

pub fn remove<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    index: usize,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let removed = open_editor(&mut dn.note, upgrade).remove(index);

    let mut result = CmdResult::default();
    if removed {
        store.save_note(&dn.note)?;
        result.add_message(CmdMessage::success(format!("Removed unit {}", index)));
        Ok(result.with_affected_notes(vec![dn]))
    } else {
        result.add_message(CmdMessage::info(format!("No unit at {}.", index)));
        Ok(result)
    }
}
