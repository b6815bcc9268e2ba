//! # Storage Layer
//!
//! This module defines the storage abstraction for quire. The [`DataStore`] trait
//! lets the command layer work against any backend that can persist whole notes.
//!
//! A stored note is a complete snapshot: title, flat content (markers verbatim),
//! optional structured content and the attachment catalog. Storage never
//! interprets content, so it cannot introduce or repair dangling references.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: One JSON file per note, written atomically.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── note-{uuid}.json    # Note snapshot
//! ```

use crate::error::Result;
use crate::model::Note;
use std::path::PathBuf;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for note storage.
pub trait DataStore {
    /// Save a note (create or update)
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Get a note by ID
    fn get_note(&self, id: &Uuid) -> Result<Note>;

    /// List all notes, in no particular order
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Delete a note permanently
    fn delete_note(&mut self, id: &Uuid) -> Result<()>;

    /// Get the file path for a note (for file-based stores)
    fn note_path(&self, id: &Uuid) -> Result<PathBuf>;
}
