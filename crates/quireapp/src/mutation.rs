//! # Block Mutation Engine
//!
//! The edits a user performs on a parsed note, and the re-serialization that
//! follows every one of them.
//!
//! ## Operations
//!
//! - **Edit**: replace one text unit's content in place.
//! - **Insert-attachments**: append one reference per new attachment, in catalog
//!   order, then a trailing empty text unit so there is always somewhere to keep
//!   typing after inserting media.
//! - **Insert-text**: append a text unit.
//! - **Reorder**: remove the unit at `from` and re-insert it at `to`; a no-op when
//!   `from == to` or either index is out of range.
//! - **Remove**: delete the unit at an index. Removing a reference never touches
//!   the catalog record.
//!
//! Every operation leaves the list non-empty: a removal that would empty it leaves
//! a single empty text unit instead.
//!
//! The list operations are generic over [`Unit`], implemented by flat-text
//! [`Segment`]s and structured [`Block`]s. [`NoteEditor`] picks the representation
//! a note is edited in (structured when the note has blocks, flat otherwise),
//! applies the operation, and immediately writes the canonical flat string (and the
//! block list, if structured) back onto the note. Batching writes is the
//! persistence layer's business; the editor always hands back a fresh, correct
//! string.

use tracing::debug;

use crate::blocks::{self, Block};
use crate::codec::{self, Segment};
use crate::error::{QuireError, Result};
use crate::model::{Attachment, Note};

/// An element of an editable list.
pub trait Unit: Clone {
    fn empty_text() -> Self;
    fn from_text(content: String) -> Self;
    fn reference(attachment: &Attachment) -> Self;
    /// Mutable access to the unit's text, `None` for units that are not plain text.
    fn editable_text(&mut self) -> Option<&mut String>;
}

impl Unit for Segment {
    fn empty_text() -> Self {
        Segment::empty()
    }

    fn from_text(content: String) -> Self {
        Segment::Text { content }
    }

    fn reference(attachment: &Attachment) -> Self {
        Segment::reference(attachment)
    }

    fn editable_text(&mut self) -> Option<&mut String> {
        match self {
            Segment::Text { content } => Some(content),
            Segment::AttachmentRef { .. } => None,
        }
    }
}

impl Unit for Block {
    fn empty_text() -> Self {
        Block::paragraph("")
    }

    fn from_text(content: String) -> Self {
        Block::Paragraph { text: content }
    }

    fn reference(attachment: &Attachment) -> Self {
        Block::attachment(attachment)
    }

    fn editable_text(&mut self) -> Option<&mut String> {
        self.text_mut()
    }
}

pub fn edit<U: Unit>(units: &mut [U], index: usize, content: impl Into<String>) -> Result<()> {
    let len = units.len();
    let unit = units
        .get_mut(index)
        .ok_or(QuireError::SegmentOutOfRange { index, len })?;
    let text = unit.editable_text().ok_or(QuireError::NotEditable(index))?;
    *text = content.into();
    Ok(())
}

pub fn insert_attachments<U: Unit>(units: &mut Vec<U>, attachments: &[Attachment]) {
    if attachments.is_empty() {
        return;
    }
    units.extend(attachments.iter().map(U::reference));
    units.push(U::empty_text());
}

pub fn insert_text<U: Unit>(units: &mut Vec<U>, content: impl Into<String>) {
    units.push(U::from_text(content.into()));
}

/// Move the unit at `from` to `to`. Returns whether anything moved.
pub fn reorder<U: Unit>(units: &mut Vec<U>, from: usize, to: usize) -> bool {
    if from == to || from >= units.len() || to >= units.len() {
        return false;
    }
    let unit = units.remove(from);
    units.insert(to, unit);
    true
}

/// Delete the unit at `index`, returning it. Out-of-range indexes remove nothing.
pub fn remove<U: Unit>(units: &mut Vec<U>, index: usize) -> Option<U> {
    if index >= units.len() {
        return None;
    }
    let removed = units.remove(index);
    if units.is_empty() {
        units.push(U::empty_text());
    }
    Some(removed)
}

/// The in-memory list a note is being edited as.
#[derive(Debug, Clone, PartialEq)]
pub enum Units {
    Flat(Vec<Segment>),
    Structured(Vec<Block>),
}

impl Units {
    pub fn len(&self) -> usize {
        match self {
            Units::Flat(s) => s.len(),
            Units::Structured(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An editing session over one note.
///
/// Parsing happens once, on construction; every operation then mutates the parsed
/// list and re-serializes onto the note.
pub struct NoteEditor<'a> {
    note: &'a mut Note,
    units: Units,
}

impl<'a> NoteEditor<'a> {
    pub fn open(note: &'a mut Note) -> Self {
        let units = match &note.structured_content {
            Some(blocks) if !blocks.is_empty() => Units::Structured(blocks.clone()),
            Some(_) => Units::Structured(vec![Block::empty_text()]),
            None => Units::Flat(codec::decode(&note.content)),
        };
        Self { note, units }
    }

    /// Upgrade a flat note to structured blocks before editing.
    pub fn open_structured(note: &'a mut Note) -> Self {
        if note.structured_content.is_none() {
            note.structured_content = Some(blocks::from_flat(&note.content));
        }
        let mut editor = Self::open(note);
        editor.commit();
        editor
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn note(&self) -> &Note {
        self.note
    }

    pub fn edit(&mut self, index: usize, content: impl Into<String>) -> Result<&str> {
        match &mut self.units {
            Units::Flat(s) => edit(s, index, content)?,
            Units::Structured(b) => edit(b, index, content)?,
        }
        debug!(note = %self.note.id, index, "edit");
        Ok(self.commit())
    }

    /// Reference attachments that were already appended to the note's catalog.
    pub fn insert_attachments(&mut self, attachments: &[Attachment]) -> &str {
        match &mut self.units {
            Units::Flat(s) => insert_attachments(s, attachments),
            Units::Structured(b) => insert_attachments(b, attachments),
        }
        debug!(note = %self.note.id, count = attachments.len(), "insert attachments");
        self.commit()
    }

    pub fn insert_text(&mut self, content: impl Into<String>) -> &str {
        match &mut self.units {
            Units::Flat(s) => insert_text(s, content),
            Units::Structured(b) => insert_text(b, content),
        }
        debug!(note = %self.note.id, "insert text");
        self.commit()
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let moved = match &mut self.units {
            Units::Flat(s) => reorder(s, from, to),
            Units::Structured(b) => reorder(b, from, to),
        };
        debug!(note = %self.note.id, from, to, moved, "reorder");
        if moved {
            self.commit();
        }
        moved
    }

    /// Remove a unit. Returns whether a unit was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        let removed = match &mut self.units {
            Units::Flat(s) => remove(s, index).is_some(),
            Units::Structured(b) => remove(b, index).is_some(),
        };
        debug!(note = %self.note.id, index, removed, "remove");
        if removed {
            self.commit();
        }
        removed
    }

    /// Re-serialize the in-memory list onto the note and return the new flat text.
    fn commit(&mut self) -> &str {
        match &self.units {
            Units::Flat(segments) => {
                self.note.content = codec::encode(segments);
            }
            Units::Structured(list) => {
                self.note.content = blocks::to_flat(list, &self.note.attachments);
                self.note.structured_content = Some(list.clone());
            }
        }
        self.note.touch();
        &self.note.content
    }
}
