use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;

use super::helpers::resolve_notes;

/// Storage paths of the selected notes.
pub fn run<S: DataStore>(store: &S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let notes = resolve_notes(store, selectors)?;
    let mut paths = Vec::with_capacity(notes.len());
    for dn in &notes {
        paths.push(store.note_path(&dn.note.id)?);
    }
    Ok(CmdResult::default().with_note_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn returns_one_path_per_note() {
        let fixture = StoreFixture::new().with_notes(2);
        let result = run(&fixture.store, &[NoteSelector::Index(2)]).unwrap();
        assert_eq!(result.note_paths.len(), 1);
        assert!(result.note_paths[0]
            .to_string_lossy()
            .starts_with("memory://note-"));
    }
}
