//! # Structured Blocks
//!
//! The editor-facing representation of a note: a flat list of typed [`Block`]s
//! (no nesting, no inline spans). Attachment blocks hold only an id; the live
//! record is resolved through an [`AttachmentLookup`] whenever it is needed, so
//! resizing or renaming an attachment never requires rewriting the block list.
//!
//! ## Legacy → structured
//!
//! [`from_flat`] is the one-time upgrade for notes that only have flat content:
//! the text is decoded into segments, each Text segment becomes one paragraph per
//! non-blank line, and each AttachmentRef becomes an attachment block.
//!
//! ## Structured → flat
//!
//! [`to_flat`] keeps the flat string searchable and exportable while blocks are
//! the editing surface. Each block contributes a textual projection, and block
//! projections are joined with `\n`:
//!
//! | Block | Projection |
//! |-------|------------|
//! | paragraph, heading, quote | its text |
//! | bullet/numbered list, checklist | item texts joined by spaces |
//! | table | each row's cells joined by spaces, rows joined by `\n` |
//! | code | the raw code |
//! | attachment | `[File: <current catalog name>](<id>)` |
//!
//! Attachment markers are rebuilt from the catalog's *current* name. For a dangling
//! id the id itself stands in for the name, so the marker still decodes.

use serde::{Deserialize, Serialize};

use crate::catalog::AttachmentLookup;
use crate::codec::{self, Segment};
use crate::marker::{Marker, MarkerLabel};
use crate::model::{Attachment, AttachmentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    BulletList {
        items: Vec<String>,
    },
    NumberedList {
        items: Vec<String>,
    },
    Checklist {
        items: Vec<ChecklistItem>,
    },
    Quote {
        text: String,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
    Attachment {
        attachment_id: AttachmentId,
    },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn attachment(attachment: &Attachment) -> Self {
        Block::Attachment {
            attachment_id: attachment.id.clone(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::BulletList { .. } => "bullet_list",
            Block::NumberedList { .. } => "numbered_list",
            Block::Checklist { .. } => "checklist",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Table { .. } => "table",
            Block::Attachment { .. } => "attachment",
        }
    }

    pub fn attachment_id(&self) -> Option<&AttachmentId> {
        match self {
            Block::Attachment { attachment_id } => Some(attachment_id),
            _ => None,
        }
    }

    /// The single editable text of a block, when it has one.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Block::Paragraph { text } | Block::Heading { text, .. } | Block::Quote { text } => {
                Some(text)
            }
            Block::Code { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Textual projection of this block.
    pub fn project<L: AttachmentLookup + ?Sized>(&self, lookup: &L) -> String {
        match self {
            Block::Paragraph { text } | Block::Heading { text, .. } | Block::Quote { text } => {
                text.clone()
            }
            Block::BulletList { items } | Block::NumberedList { items } => items.join(" "),
            Block::Checklist { items } => items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Block::Table { rows } => rows
                .iter()
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { code, .. } => code.clone(),
            Block::Attachment { attachment_id } => {
                let name = lookup
                    .lookup(attachment_id.as_str())
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| attachment_id.to_string());
                Marker::new(MarkerLabel::File, name, attachment_id.clone()).to_string()
            }
        }
    }
}

/// Upgrade flat content to a structured block list. Never returns an empty list.
pub fn from_flat(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in codec::decode(text) {
        match segment {
            Segment::Text { content } => {
                blocks.extend(
                    content
                        .lines()
                        .filter(|line| !line.trim().is_empty())
                        .map(Block::paragraph),
                );
            }
            Segment::AttachmentRef { attachment_id, .. } => {
                blocks.push(Block::Attachment { attachment_id });
            }
        }
    }
    if blocks.is_empty() {
        blocks.push(Block::paragraph(""));
    }
    blocks
}

/// Project a block list to flat text, resolving attachment names through `lookup`.
pub fn to_flat<L: AttachmentLookup + ?Sized>(blocks: &[Block], lookup: &L) -> String {
    blocks
        .iter()
        .map(|block| block.project(lookup))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every attachment id referenced by a block list, in order.
pub fn referenced_ids(blocks: &[Block]) -> Vec<&AttachmentId> {
    blocks.iter().filter_map(Block::attachment_id).collect()
}
