use super::DataStore;
use crate::error::{QuireError, Result};
use crate::model::Note;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

const NOTE_PREFIX: &str = "note-";
const NOTE_EXT: &str = ".json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_file(&self, id: &Uuid) -> PathBuf {
        self.root.join(format!("{}{}{}", NOTE_PREFIX, id, NOTE_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(QuireError::Io)?;
        }
        Ok(())
    }

    fn read_note(path: &Path) -> Result<Note> {
        let raw = fs::read_to_string(path).map_err(QuireError::Io)?;
        serde_json::from_str(&raw).map_err(QuireError::Serialization)
    }

    /// Write to a temp file then rename over the target, so a crash never
    /// leaves a half-written snapshot behind.
    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        let tmp = self.root.join(format!(".note-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(QuireError::Io)?;
        if let Err(err) = fs::rename(&tmp, target) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
            }
            return Err(QuireError::Io(err));
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(note).map_err(QuireError::Serialization)?;
        self.write_atomic(&self.note_file(&note.id), &content)
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        let path = self.note_file(id);
        if !path.exists() {
            return Err(QuireError::NoteNotFound(*id));
        }
        Self::read_note(&path)
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut notes = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(QuireError::Io)? {
            let path = entry.map_err(QuireError::Io)?.path();
            let is_note = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(NOTE_PREFIX) && n.ends_with(NOTE_EXT));
            if !is_note || !path.is_file() {
                continue;
            }
            match Self::read_note(&path) {
                Ok(note) => notes.push(note),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable note"),
            }
        }
        Ok(notes)
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        let path = self.note_file(id);
        if !path.exists() {
            return Err(QuireError::NoteNotFound(*id));
        }
        fs::remove_file(path).map_err(QuireError::Io)
    }

    fn note_path(&self, id: &Uuid) -> Result<PathBuf> {
        Ok(self.note_file(id))
    }
}
