use super::DataStore;
use crate::error::{QuireError, Result};
use crate::model::Note;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    notes: HashMap<Uuid, Note>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        self.notes.insert(note.id, note.clone());
        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        self.notes
            .get(id)
            .cloned()
            .ok_or(QuireError::NoteNotFound(*id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        self.notes
            .remove(id)
            .map(|_| ())
            .ok_or(QuireError::NoteNotFound(*id))
    }

    fn note_path(&self, id: &Uuid) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("memory://note-{}", id)))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Add `count` notes, the first one oldest. Creation times are spaced
        /// so display order is deterministic.
        pub fn with_notes(mut self, count: usize) -> Self {
            let base = Utc::now() - Duration::hours(count as i64 + 1);
            for i in 0..count {
                let mut note = Note::new(
                    format!("Test Note {}", i + 1),
                    format!("Content for note {}", i + 1),
                );
                note.created_at = base + Duration::minutes(i as i64 + 1);
                note.updated_at = note.created_at;
                self.store.save_note(&note).unwrap();
            }
            self
        }

        /// Add a note that is created after every note already present.
        pub fn with_note(mut self, mut note: Note) -> Self {
            note.created_at = Utc::now() + Duration::minutes(self.store.notes.len() as i64);
            self.store.save_note(&note).unwrap();
            self
        }
    }
}
