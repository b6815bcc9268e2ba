//! # Attachment Catalog
//!
//! The ordered, note-owned collection of [`Attachment`] records. The catalog is the
//! only place attachment metadata lives; text and blocks hold ids and resolve them
//! here at use time.
//!
//! Lookups during a render pass go through a [`CatalogIndex`], an id → record map
//! built once per pass, so resolving N references costs O(N) instead of O(N·M).
//! Anything that needs to resolve ids takes an [`AttachmentLookup`], which both the
//! catalog and the index implement.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{QuireError, Result};
use crate::model::{Attachment, AttachmentId, AttachmentKind};

/// Resolves attachment ids to live records.
pub trait AttachmentLookup {
    fn lookup(&self, id: &str) -> Option<&Attachment>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentCatalog {
    records: Vec<Attachment>,
}

impl AttachmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attachment> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Attachment> {
        self.records.iter().find(|a| a.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a record at the end of the catalog.
    pub fn push(&mut self, attachment: Attachment) {
        self.records.push(attachment);
    }

    /// Append a batch, preserving batch order.
    pub fn extend<I: IntoIterator<Item = Attachment>>(&mut self, attachments: I) {
        self.records.extend(attachments);
    }

    /// Drop a record. Markers referencing it are left dangling.
    pub fn remove(&mut self, id: &str) -> Option<Attachment> {
        let pos = self.records.iter().position(|a| a.id.as_str() == id)?;
        Some(self.records.remove(pos))
    }

    /// Set an image's display width. `None` restores the natural size.
    pub fn set_width(&mut self, id: &str, width: Option<u32>) -> Result<&Attachment> {
        let record = self.get_mut(id)?;
        if record.kind != AttachmentKind::Image {
            return Err(QuireError::NotAnImage(id.to_string()));
        }
        record.width = width;
        Ok(&*record)
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<&Attachment> {
        let record = self.get_mut(id)?;
        record.name = name.into();
        Ok(&*record)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AttachmentId> {
        self.records.iter().map(|a| &a.id)
    }

    /// Build the per-render-pass id index.
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(self)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Attachment> {
        self.records
            .iter_mut()
            .find(|a| a.id.as_str() == id)
            .ok_or_else(|| QuireError::AttachmentNotFound(id.to_string()))
    }
}

impl AttachmentLookup for AttachmentCatalog {
    fn lookup(&self, id: &str) -> Option<&Attachment> {
        self.get(id)
    }
}

impl<'a> IntoIterator for &'a AttachmentCatalog {
    type Item = &'a Attachment;
    type IntoIter = std::slice::Iter<'a, Attachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Attachment> for AttachmentCatalog {
    fn from_iter<I: IntoIterator<Item = Attachment>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Borrowed id → record map over a catalog snapshot.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    by_id: HashMap<&'a str, &'a Attachment>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a AttachmentCatalog) -> Self {
        let by_id = catalog.iter().map(|a| (a.id.as_str(), a)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Attachment> {
        self.by_id.get(id).copied()
    }
}

impl AttachmentLookup for CatalogIndex<'_> {
    fn lookup(&self, id: &str) -> Option<&Attachment> {
        self.get(id)
    }
}
