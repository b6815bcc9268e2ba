use crate::codec::Segment;
use crate::commands::{CmdMessage, CmdResult, NoteView, UnitLine, ViewUnit};
use crate::error::Result;
use crate::index::{DisplayNote, NoteSelector};
use crate::mutation::Units;
use crate::render::{render, ParsedNote, Rendered, RenderedBlock, RenderedSegment, Resolution};
use crate::store::DataStore;

use super::helpers::{open_editor, resolve_note};

/// Render one note: every unit resolved, dangling references as placeholders.
pub fn run<S: DataStore>(store: &S, selector: &NoteSelector) -> Result<CmdResult> {
    let dn = resolve_note(store, selector)?;
    let view = note_view(&dn);

    let mut result = CmdResult::default();
    if view.missing > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} attachment reference(s) point at missing records",
            view.missing
        )));
    }
    result.views.push(view);
    Ok(result)
}

pub fn note_view(dn: &DisplayNote) -> NoteView {
    let note = &dn.note;
    let parsed = ParsedNote::of(note);
    let rendered = render(&parsed, &note.attachments);
    let missing = rendered.missing_count();

    let units = match rendered {
        Rendered::Flat(segments) => segments
            .into_iter()
            .map(|unit| match unit {
                RenderedSegment::Text { content } => ViewUnit::Text {
                    content: content.to_string(),
                },
                RenderedSegment::Attachment(resolution) => resolution.into(),
            })
            .collect(),
        Rendered::Structured(blocks) => blocks
            .into_iter()
            .map(|unit| match unit {
                RenderedBlock::Block { block } => ViewUnit::Block {
                    block: block.clone(),
                },
                RenderedBlock::Attachment(resolution) => resolution.into(),
            })
            .collect(),
    };

    NoteView {
        index: dn.index,
        id: note.id,
        title: note.title.clone(),
        structured: note.is_structured(),
        units,
        missing,
    }
}

impl From<Resolution<'_>> for ViewUnit {
    fn from(resolution: Resolution<'_>) -> Self {
        match resolution {
            Resolution::Found {
                attachment,
                variant,
            } => ViewUnit::Attachment {
                attachment: attachment.clone(),
                variant,
            },
            Resolution::Missing { attachment_id } => ViewUnit::Missing {
                attachment_id: attachment_id.clone(),
            },
        }
    }
}

/// List a note's editable units with their indexes.
///
/// With `upgrade` set, a flat note is listed as the blocks the mutating
/// commands would address. Nothing is saved.
pub fn segments<S: DataStore>(
    store: &S,
    selector: &NoteSelector,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let editor = open_editor(&mut dn.note, upgrade);

    let units = match editor.units() {
        Units::Flat(segments) => segments
            .iter()
            .enumerate()
            .map(|(index, segment)| UnitLine {
                index,
                kind: if segment.is_text() { "text" } else { "attachment" },
                preview: match segment {
                    Segment::Text { content } => content.clone(),
                    Segment::AttachmentRef { raw_marker, .. } => raw_marker.clone(),
                },
            })
            .collect(),
        Units::Structured(blocks) => blocks
            .iter()
            .enumerate()
            .map(|(index, block)| UnitLine {
                index,
                kind: block.kind_name(),
                preview: block.project(&editor.note().attachments),
            })
            .collect(),
    };

    Ok(CmdResult {
        units,
        ..Default::default()
    })
}
