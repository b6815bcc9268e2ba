//! # Note Identifiers: UUID vs Display Index
//!
//! Notes are identified by UUID, which is cumbersome to type on a command line.
//! Users instead refer to notes by a 1-based display index over the canonical
//! ordering (newest first), or by a UUID prefix when they need a reference that
//! does not drift as new notes are created.
//!
//! - [`index_notes`]: Assigns display indexes to a list of notes.
//! - [`DisplayNote`]: Pairs a `Note` with its display index.
//! - [`NoteSelector`]: Parsed user input (`3`, `8f1c9a4e`).
//!
//! **Developer Note**: list and view commands must go through [`index_notes`].
//! Never enumerate a store listing by hand, or indexes will disagree between
//! commands.

use crate::error::{QuireError, Result};
use crate::model::Note;
use std::fmt;
use std::str::FromStr;

/// Shortest accepted UUID prefix.
pub const MIN_ID_PREFIX: usize = 4;

/// All-digit input at least this long is read as an id prefix, not an index.
const DIGIT_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNote {
    pub note: Note,
    pub index: usize,
}

/// Canonical ordering: newest first, ties broken by id. Index 1 is the newest.
pub fn index_notes(mut notes: Vec<Note>) -> Vec<DisplayNote> {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    notes
        .into_iter()
        .enumerate()
        .map(|(i, note)| DisplayNote { note, index: i + 1 })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(usize),
    IdPrefix(String),
}

impl NoteSelector {
    pub fn matches(&self, dn: &DisplayNote) -> bool {
        match self {
            NoteSelector::Index(i) => dn.index == *i,
            NoteSelector::IdPrefix(prefix) => dn.note.id.to_string().starts_with(prefix),
        }
    }
}

impl FromStr for NoteSelector {
    type Err = QuireError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            if index == 0 {
                return Err(QuireError::InvalidSelector(
                    "indexes start at 1".to_string(),
                ));
            }
            if s.len() < DIGIT_PREFIX_LEN {
                return Ok(NoteSelector::Index(index));
            }
        }

        let is_id_like = s.len() >= MIN_ID_PREFIX
            && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
        if is_id_like {
            Ok(NoteSelector::IdPrefix(s.to_ascii_lowercase()))
        } else {
            Err(QuireError::InvalidSelector(s.to_string()))
        }
    }
}

impl fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSelector::Index(i) => write!(f, "{}", i),
            NoteSelector::IdPrefix(p) => f.write_str(p),
        }
    }
}
