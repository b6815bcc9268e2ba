//! # Command Layer
//!
//! This module contains the **core business logic** of quire. Each command lives in
//! its own submodule and implements pure Rust functions over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve note selectors against the canonical index
//! - Drive the content core (codec, mutation engine, render resolution)
//! - Persist the resulting note snapshot
//! - Return structured [`CmdResult`] values with affected notes and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **Async work**: Attachment ingestion runs before a command is called; the
//!   command only receives its [`crate::ingest::IngestReport`]
//!
//! ## Unit Indexes
//!
//! Mutation commands address segments (flat notes) or blocks (structured notes)
//! by 0-based position, as listed by [`segments`].
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against [`crate::store::memory::InMemoryStore`] and check `CmdResult`
//! contents, stored note state and error conditions.
//!
//! [`DataStore`]: crate::store::DataStore

use crate::blocks::Block;
use crate::embed::RenderVariant;
use crate::index::DisplayNote;
use crate::model::{Attachment, AttachmentId};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

pub mod attach;
pub mod attachments;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod paths;
pub mod upgrade;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One rendered unit of a note, owning its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum ViewUnit {
    Text {
        content: String,
    },
    Block {
        block: Block,
    },
    Attachment {
        attachment: Attachment,
        variant: RenderVariant,
    },
    /// Placeholder for a reference whose record is not in the catalog.
    Missing {
        attachment_id: AttachmentId,
    },
}

/// A note resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct NoteView {
    pub index: usize,
    pub id: Uuid,
    pub title: String,
    pub structured: bool,
    pub units: Vec<ViewUnit>,
    pub missing: usize,
}

/// One editable unit, as listed for targeting mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitLine {
    pub index: usize,
    pub kind: &'static str,
    pub preview: String,
}

/// Referential integrity report for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorFinding {
    pub index: usize,
    pub title: String,
    /// Ids referenced by content but absent from the catalog.
    pub dangling: Vec<AttachmentId>,
    /// Catalog records no content references.
    pub unreferenced: Vec<AttachmentId>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<DisplayNote>,
    pub listed_notes: Vec<DisplayNote>,
    pub views: Vec<NoteView>,
    pub units: Vec<UnitLine>,
    pub findings: Vec<DoctorFinding>,
    pub note_paths: Vec<PathBuf>,
    /// Document produced by the command (e.g. Markdown export).
    pub output: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_note_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.note_paths = paths;
        self
    }
}
