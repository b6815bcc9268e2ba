//! # Flat-Text Codec
//!
//! Moves between the flat string stored on a note and an ordered list of
//! [`Segment`]s.
//!
//! ## Decoding
//!
//! The text is split on marker occurrences with the markers *kept*, so segment
//! boundaries line up exactly with marker start/end:
//!
//! ```text
//! "Intro text\n[File: photo.png](att-1)\nOutro"
//!   → Text("Intro text\n")
//!   → AttachmentRef("[File: photo.png](att-1)", att-1)
//!   → Text("\nOutro")
//! ```
//!
//! Empty pieces are dropped. If nothing is left (empty note) the result is a single
//! empty Text segment, so callers always have one editable unit.
//!
//! Text segments are exact byte slices of the input: never trimmed, never reflowed.
//! Decoding does not check that referenced ids exist; that is deferred to render
//! time, which keeps decoding total and side-effect free.
//!
//! ## Encoding
//!
//! Concatenation of each segment's literal text (`content` or `raw_marker`), in
//! order, with no separators. For any input, `encode(&decode(s)) == s`.

use serde::{Deserialize, Serialize};

use crate::marker::{Marker, MARKER_RE};
use crate::model::{Attachment, AttachmentId};

/// One parsed unit of flat text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text {
        content: String,
    },
    AttachmentRef {
        raw_marker: String,
        attachment_id: AttachmentId,
    },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn empty() -> Self {
        Self::text(String::new())
    }

    /// Reference segment for a freshly inserted attachment.
    pub fn reference(attachment: &Attachment) -> Self {
        Segment::AttachmentRef {
            raw_marker: Marker::for_attachment(attachment).to_string(),
            attachment_id: attachment.id.clone(),
        }
    }

    /// The literal text this segment contributes to the flat string.
    pub fn literal(&self) -> &str {
        match self {
            Segment::Text { content } => content,
            Segment::AttachmentRef { raw_marker, .. } => raw_marker,
        }
    }

    pub fn attachment_id(&self) -> Option<&AttachmentId> {
        match self {
            Segment::AttachmentRef { attachment_id, .. } => Some(attachment_id),
            Segment::Text { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text { .. })
    }
}

/// Split flat text into segments. Never returns an empty list.
pub fn decode(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for found in MARKER_RE.find_iter(text) {
        push_text(&mut segments, &text[last..found.start()]);
        let piece = found.as_str();
        match Marker::parse(piece) {
            Some(marker) => segments.push(Segment::AttachmentRef {
                raw_marker: piece.to_string(),
                attachment_id: marker.attachment_id,
            }),
            None => push_text(&mut segments, piece),
        }
        last = found.end();
    }
    push_text(&mut segments, &text[last..]);

    if segments.is_empty() {
        segments.push(Segment::empty());
    }
    segments
}

/// Join segments back into flat text.
pub fn encode(segments: &[Segment]) -> String {
    let capacity = segments.iter().map(|s| s.literal().len()).sum();
    let mut out = String::with_capacity(capacity);
    for segment in segments {
        out.push_str(segment.literal());
    }
    out
}

fn push_text(segments: &mut Vec<Segment>, piece: &str) {
    if !piece.is_empty() {
        segments.push(Segment::text(piece));
    }
}
