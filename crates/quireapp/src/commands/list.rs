use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::indexed_notes;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let notes = indexed_notes(store)?;
    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes yet."));
    }
    Ok(result.with_listed_notes(notes))
}
