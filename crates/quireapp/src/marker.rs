//! # Reference Grammar
//!
//! Attachments are anchored in flat text by markers:
//!
//! ```text
//! [File: <name>](<attachment-id>)
//! [Link: <name>](<attachment-id>)
//! ```
//!
//! - `<attachment-id>` is `att-` followed by one or more non-`)` characters.
//! - `<name>` is any run of characters without `]`. It is cosmetic: resolution
//!   always goes through the id, so a stale or hand-edited name never breaks the
//!   reference. Display names are read from the catalog, never from the marker.
//!
//! This marker syntax is the only wire format the content core owns. Exports and
//! backups must carry it verbatim for decoding to stay lossless on import.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::model::{Attachment, AttachmentId, AttachmentKind};

/// Unanchored marker pattern, used for scanning flat text.
pub static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(File|Link): ([^\]]*)\]\((att-[^)]+)\)").expect("marker regex is valid")
});

static WHOLE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(File|Link): ([^\]]*)\]\((att-[^)]+)\)$").expect("marker regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerLabel {
    File,
    Link,
}

impl MarkerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerLabel::File => "File",
            MarkerLabel::Link => "Link",
        }
    }

    /// Label used when inserting a reference to a freshly added attachment.
    pub fn for_kind(kind: AttachmentKind) -> Self {
        match kind {
            AttachmentKind::Url => MarkerLabel::Link,
            _ => MarkerLabel::File,
        }
    }
}

/// A parsed marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub label: MarkerLabel,
    pub name: String,
    pub attachment_id: AttachmentId,
}

impl Marker {
    pub fn new(label: MarkerLabel, name: impl Into<String>, attachment_id: AttachmentId) -> Self {
        Self {
            label,
            name: name.into(),
            attachment_id,
        }
    }

    /// Marker for inserting a reference to `attachment`.
    pub fn for_attachment(attachment: &Attachment) -> Self {
        Self::new(
            MarkerLabel::for_kind(attachment.kind),
            attachment.name.clone(),
            attachment.id.clone(),
        )
    }

    /// Parse `text` if the whole string is exactly one marker.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = WHOLE_MARKER_RE.captures(text)?;
        let label = match &caps[1] {
            "Link" => MarkerLabel::Link,
            _ => MarkerLabel::File,
        };
        Some(Self {
            label,
            name: caps[2].to_string(),
            attachment_id: AttachmentId::from(&caps[3]),
        })
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}: {}]({})",
            self.label.as_str(),
            sanitize_name(&self.name),
            self.attachment_id
        )
    }
}

/// Whether `text` is exactly one well-formed marker.
pub fn is_marker(text: &str) -> bool {
    WHOLE_MARKER_RE.is_match(text)
}

/// Every attachment id referenced by markers in `text`, in order of appearance.
pub fn referenced_ids(text: &str) -> Vec<AttachmentId> {
    MARKER_RE
        .captures_iter(text)
        .map(|caps| AttachmentId::from(&caps[3]))
        .collect()
}

/// Brackets in a display name would end the marker early; swap them for parens.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' => '(',
            ']' => ')',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_marker() {
        let marker = Marker::parse("[File: photo.png](att-1)").unwrap();
        assert_eq!(marker.label, MarkerLabel::File);
        assert_eq!(marker.name, "photo.png");
        assert_eq!(marker.attachment_id.as_str(), "att-1");
    }

    #[test]
    fn parses_link_marker() {
        let marker = Marker::parse("[Link: Example](att-abc123)").unwrap();
        assert_eq!(marker.label, MarkerLabel::Link);
        assert_eq!(marker.attachment_id.as_str(), "att-abc123");
    }

    #[test]
    fn name_may_contain_parens_and_spaces() {
        let marker = Marker::parse("[File: my (final) draft.pdf](att-x)").unwrap();
        assert_eq!(marker.name, "my (final) draft.pdf");
    }

    #[test]
    fn rejects_partial_or_surrounded_markers() {
        assert!(Marker::parse("see [File: a.png](att-1)").is_none());
        assert!(Marker::parse("[File: a.png](att-1) trailing").is_none());
        assert!(Marker::parse("[File: a.png](att-)").is_none());
        assert!(Marker::parse("[File: a.png](img-1)").is_none());
        assert!(Marker::parse("[Image: a.png](att-1)").is_none());
        assert!(Marker::parse("[File:a.png](att-1)").is_none());
    }

    #[test]
    fn display_reproduces_marker() {
        let marker = Marker::new(MarkerLabel::Link, "Docs", AttachmentId::from("att-9"));
        assert_eq!(marker.to_string(), "[Link: Docs](att-9)");
        assert_eq!(Marker::parse(&marker.to_string()), Some(marker));
    }

    #[test]
    fn display_neutralizes_brackets_in_names() {
        let marker = Marker::new(MarkerLabel::File, "a]b[c", AttachmentId::from("att-9"));
        let text = marker.to_string();
        assert_eq!(text, "[File: a)b(c](att-9)");
        assert!(is_marker(&text));
    }

    #[test]
    fn label_follows_kind() {
        assert_eq!(MarkerLabel::for_kind(AttachmentKind::Url), MarkerLabel::Link);
        assert_eq!(MarkerLabel::for_kind(AttachmentKind::Image), MarkerLabel::File);
    }

    #[test]
    fn collects_referenced_ids_in_order() {
        let text = "a [File: x](att-2) b [Link: y](att-1) [File: x](att-2)";
        let ids: Vec<String> = referenced_ids(text).into_iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["att-2", "att-1", "att-2"]);
    }
}
