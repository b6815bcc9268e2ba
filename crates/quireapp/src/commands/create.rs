use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayNote;
use crate::model::Note;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(store: &mut S, title: String, content: String) -> Result<CmdResult> {
    let note = Note::new(title, content);
    store.save_note(&note)?;
    info!(note = %note.id, "created note");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note created: {}", note.title)));
    // New note is always the newest, so it gets index 1
    result.affected_notes.push(DisplayNote { note, index: 1 });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_flat_note() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "Groceries".into(), "eggs".into()).unwrap();

        assert_eq!(result.affected_notes.len(), 1);
        assert_eq!(result.affected_notes[0].index, 1);
        let note = &result.affected_notes[0].note;
        assert_eq!(note.content, "eggs");
        assert!(!note.is_structured());
        assert!(note.attachments.is_empty());
        assert_eq!(store.list_notes().unwrap().len(), 1);
    }
}
