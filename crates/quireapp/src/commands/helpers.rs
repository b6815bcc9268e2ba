use crate::error::{QuireError, Result};
use crate::index::{index_notes, DisplayNote, NoteSelector};
use crate::model::Note;
use crate::mutation::NoteEditor;
use crate::store::DataStore;

pub fn indexed_notes<S: DataStore>(store: &S) -> Result<Vec<DisplayNote>> {
    Ok(index_notes(store.list_notes()?))
}

/// Resolve a selector to exactly one note.
pub fn resolve_note<S: DataStore>(store: &S, selector: &NoteSelector) -> Result<DisplayNote> {
    let mut matches: Vec<DisplayNote> = indexed_notes(store)?
        .into_iter()
        .filter(|dn| selector.matches(dn))
        .collect();

    match matches.len() {
        0 => Err(QuireError::Api(format!("No note found for {}", selector))),
        1 => Ok(matches.remove(0)),
        n => Err(QuireError::Api(format!(
            "Id prefix {} matches {} notes. Please be more specific.",
            selector, n
        ))),
    }
}

pub fn resolve_notes<S: DataStore>(
    store: &S,
    selectors: &[NoteSelector],
) -> Result<Vec<DisplayNote>> {
    if selectors.is_empty() {
        return indexed_notes(store);
    }
    let mut notes: Vec<DisplayNote> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let dn = resolve_note(store, selector)?;
        if !notes.iter().any(|n| n.note.id == dn.note.id) {
            notes.push(dn);
        }
    }
    Ok(notes)
}

/// Open an editor over `note`, upgrading flat notes to blocks when asked.
pub fn open_editor(note: &mut Note, upgrade: bool) -> NoteEditor<'_> {
    if upgrade {
        NoteEditor::open_structured(note)
    } else {
        NoteEditor::open(note)
    }
}
