//! # Render Resolution
//!
//! The read-only pass that turns a parsed note into presentable units. Both the
//! flat-text path ([`render_segments`]) and the structured path ([`render_blocks`])
//! resolve attachment references the same way:
//!
//! 1. Build a [`CatalogIndex`] once for the pass.
//! 2. For each reference, look its id up.
//! 3. Found → classify it ([`crate::embed::classify`]) and carry the live record.
//! 4. Not found → a [`Resolution::Missing`] placeholder carrying the raw id.
//!
//! A missing attachment is an expected state whenever references and catalog
//! drift. It never fails the pass and never stops other units from rendering.
//!
//! Display names always come from the live record. The name embedded in a marker
//! is never shown.

use serde::Serialize;
use tracing::warn;

use crate::blocks::Block;
use crate::catalog::{AttachmentCatalog, CatalogIndex};
use crate::codec::{self, Segment};
use crate::embed::{classify, RenderVariant};
use crate::model::{Attachment, AttachmentId, Note};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution<'a> {
    Found {
        attachment: &'a Attachment,
        variant: RenderVariant,
    },
    Missing {
        attachment_id: &'a AttachmentId,
    },
}

impl Resolution<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum RenderedSegment<'a> {
    Text { content: &'a str },
    Attachment(Resolution<'a>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum RenderedBlock<'a> {
    Block { block: &'a Block },
    Attachment(Resolution<'a>),
}

pub fn resolve<'a>(attachment_id: &'a AttachmentId, index: &CatalogIndex<'a>) -> Resolution<'a> {
    match index.get(attachment_id.as_str()) {
        Some(attachment) => Resolution::Found {
            attachment,
            variant: classify(attachment),
        },
        None => {
            warn!(attachment = %attachment_id, "dangling attachment reference");
            Resolution::Missing { attachment_id }
        }
    }
}

pub fn render_segments<'a>(
    segments: &'a [Segment],
    catalog: &'a AttachmentCatalog,
) -> Vec<RenderedSegment<'a>> {
    let index = catalog.index();
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { content } => RenderedSegment::Text { content },
            Segment::AttachmentRef { attachment_id, .. } => {
                RenderedSegment::Attachment(resolve(attachment_id, &index))
            }
        })
        .collect()
}

pub fn render_blocks<'a>(
    blocks: &'a [Block],
    catalog: &'a AttachmentCatalog,
) -> Vec<RenderedBlock<'a>> {
    let index = catalog.index();
    blocks
        .iter()
        .map(|block| match block {
            Block::Attachment { attachment_id } => {
                RenderedBlock::Attachment(resolve(attachment_id, &index))
            }
            other => RenderedBlock::Block { block: other },
        })
        .collect()
}

/// A note decoded for display, owning the parsed units it renders from.
#[derive(Debug, Clone)]
pub enum ParsedNote {
    Flat(Vec<Segment>),
    Structured(Vec<Block>),
}

impl ParsedNote {
    /// Parse a note in its editing representation.
    pub fn of(note: &Note) -> Self {
        match &note.structured_content {
            Some(blocks) => ParsedNote::Structured(blocks.clone()),
            None => ParsedNote::Flat(codec::decode(&note.content)),
        }
    }
}

/// Rendered output for either representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "form", content = "units", rename_all = "snake_case")]
pub enum Rendered<'a> {
    Flat(Vec<RenderedSegment<'a>>),
    Structured(Vec<RenderedBlock<'a>>),
}

impl Rendered<'_> {
    pub fn missing_count(&self) -> usize {
        match self {
            Rendered::Flat(units) => units
                .iter()
                .filter(|u| matches!(u, RenderedSegment::Attachment(r) if r.is_missing()))
                .count(),
            Rendered::Structured(units) => units
                .iter()
                .filter(|u| matches!(u, RenderedBlock::Attachment(r) if r.is_missing()))
                .count(),
        }
    }
}

pub fn render<'a>(parsed: &'a ParsedNote, catalog: &'a AttachmentCatalog) -> Rendered<'a> {
    match parsed {
        ParsedNote::Flat(segments) => Rendered::Flat(render_segments(segments, catalog)),
        ParsedNote::Structured(blocks) => Rendered::Structured(render_blocks(blocks, catalog)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttachmentKind;
    use crate::test_utils::{attachment, image};

    #[test]
    fn dangling_reference_renders_placeholder_and_others_render() {
        let catalog: AttachmentCatalog = vec![image("att-1", "photo.png")].into_iter().collect();
        let segments = codec::decode("a[File: photo.png](att-1)b[File: gone.png](att-9)c");
        let rendered = render_segments(&segments, &catalog);

        assert_eq!(rendered.len(), 5);
        assert_eq!(rendered[0], RenderedSegment::Text { content: "a" });
        assert!(matches!(
            &rendered[1],
            RenderedSegment::Attachment(Resolution::Found { attachment, variant: RenderVariant::Image { .. } })
                if attachment.id.as_str() == "att-1"
        ));
        assert!(matches!(
            &rendered[3],
            RenderedSegment::Attachment(Resolution::Missing { attachment_id })
                if attachment_id.as_str() == "att-9"
        ));
        assert_eq!(rendered[4], RenderedSegment::Text { content: "c" });
        assert_eq!(Rendered::Flat(rendered).missing_count(), 1);
    }

    #[test]
    fn rendering_uses_catalog_name_not_marker_name() {
        let catalog: AttachmentCatalog =
            vec![image("att-1", "renamed.png")].into_iter().collect();
        let segments = codec::decode("[File: stale.png](att-1)");
        let rendered = render_segments(&segments, &catalog);
        match &rendered[0] {
            RenderedSegment::Attachment(Resolution::Found { attachment, .. }) => {
                assert_eq!(attachment.name, "renamed.png")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resize_is_visible_without_touching_blocks() {
        let mut catalog: AttachmentCatalog = vec![image("att-1", "a.png")].into_iter().collect();
        let blocks = vec![Block::Attachment {
            attachment_id: AttachmentId::from("att-1"),
        }];
        catalog.set_width("att-1", Some(128)).unwrap();
        let rendered = render_blocks(&blocks, &catalog);
        assert!(matches!(
            &rendered[0],
            RenderedBlock::Attachment(Resolution::Found {
                variant: RenderVariant::Image { width: Some(128) },
                ..
            })
        ));
    }

    #[test]
    fn structured_blocks_pass_through() {
        let catalog: AttachmentCatalog =
            vec![attachment("att-2", "site", AttachmentKind::Url)].into_iter().collect();
        let blocks = vec![
            Block::paragraph("hi"),
            Block::Attachment {
                attachment_id: AttachmentId::from("att-2"),
            },
        ];
        let rendered = render_blocks(&blocks, &catalog);
        assert!(matches!(rendered[0], RenderedBlock::Block { .. }));
        assert!(matches!(
            rendered[1],
            RenderedBlock::Attachment(Resolution::Found { .. })
        ));
    }

    #[test]
    fn parsed_note_follows_representation() {
        let mut note = Note::new("t", "plain");
        assert!(matches!(ParsedNote::of(&note), ParsedNote::Flat(_)));
        note.structured_content = Some(vec![Block::paragraph("plain")]);
        assert!(matches!(ParsedNote::of(&note), ParsedNote::Structured(_)));
    }
}
