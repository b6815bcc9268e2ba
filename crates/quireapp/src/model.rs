//! # Domain Model: Notes and Attachments
//!
//! This module defines the core data structures for quire: [`Note`], [`Attachment`],
//! [`AttachmentKind`] and [`AttachmentId`].
//!
//! ## Two Representations of One Note
//!
//! A note's content exists in up to two forms:
//!
//! ```text
//! content             <-- flat string, canonical, what storage and search see
//! structured_content  <-- optional block list, derived editing surface
//! attachments         <-- ordered catalog, source of truth for attachment metadata
//! ```
//!
//! The flat string embeds attachment references as markers
//! (`[File: photo.png](att-1)`, see [`crate::marker`]). The structured form stores
//! attachment blocks that carry only the id. Neither form ever copies attachment
//! metadata: names, widths and payload locators are always read from the catalog.
//!
//! ## Dangling References
//!
//! Any id referenced by `content` or `structured_content` either exists in
//! `attachments` or is *dangling*. Dangling is a normal state (partial backups,
//! detached records) and is rendered as a placeholder, never treated as an error.
//!
//! ## Attachment Lifecycle
//!
//! - Created by ingestion (uploaded file) or by submitting a URL.
//! - Appended to the end of the note's catalog.
//! - Mutated only for `width` (image resize) and display name.
//! - Removed only by being dropped from the catalog. Removing a marker from the
//!   text never deletes the record, and dropping the record never edits the text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

use crate::blocks::Block;
use crate::catalog::AttachmentCatalog;

/// Prefix shared by every attachment id.
pub const ATTACHMENT_ID_PREFIX: &str = "att-";

/// Identifier of an attachment record, of the form `att-<token>`.
///
/// Ids are globally unique and never reused: a detached attachment's id is not
/// handed out again, so stale markers can never silently point at a new record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(String);

impl AttachmentId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        Self(format!("{}{}", ATTACHMENT_ID_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttachmentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AttachmentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for AttachmentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of attachment kinds persisted in the catalog.
///
/// `Url` is refined further at render time (video embed, social embed, plain
/// link, broken link) by [`crate::embed`], without adding catalog-level states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Audio,
    Video,
    Image,
    Document,
    Url,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Audio => "audio",
            AttachmentKind::Video => "video",
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
            AttachmentKind::Url => "url",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attachment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub kind: AttachmentKind,
    /// Payload locator: a `data:` URI for uploaded files, an external URL otherwise.
    pub url: String,
    /// Display width in pixels. Images only, user-resizable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, kind: AttachmentKind, url: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::generate(),
            name: name.into(),
            kind,
            url: url.into(),
            width: None,
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn is_data_uri(&self) -> bool {
        self.url.starts_with("data:")
    }
}

/// A note: title, canonical flat content, optional structured form, and the
/// attachment catalog it exclusively owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Vec<Block>>,
    #[serde(default)]
    pub attachments: AttachmentCatalog,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            structured_content: None,
            attachments: AttachmentCatalog::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_structured(&self) -> bool {
        self.structured_content.is_some()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
