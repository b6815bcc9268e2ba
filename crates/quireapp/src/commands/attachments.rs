//! Catalog maintenance: detach, resize and rename.
//!
//! These touch only the attachment record. References in content are left as
//! they are: detaching leaves them dangling, and resizing or renaming is picked
//! up by rendering through the id indirection.

use crate::blocks;
use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::index::NoteSelector;
use crate::model::Note;
use crate::store::DataStore;
use tracing::debug;

use super::helpers::resolve_note;

pub fn detach<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    attachment_id: &str,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let removed = dn
        .note
        .attachments
        .remove(attachment_id)
        .ok_or_else(|| QuireError::AttachmentNotFound(attachment_id.to_string()))?;
    dn.note.touch();
    store.save_note(&dn.note)?;
    debug!(note = %dn.note.id, id = attachment_id, "detach");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Detached {} ({})",
        removed.name, removed.id
    )));
    let dangling = reference_count(&dn.note, attachment_id);
    if dangling > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} reference(s) to {} now render as missing",
            dangling, attachment_id
        )));
    }
    Ok(result.with_affected_notes(vec![dn]))
}

/// Set an image's display width; `None` restores natural size.
pub fn resize<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    attachment_id: &str,
    width: Option<u32>,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    let message = {
        let record = dn.note.attachments.set_width(attachment_id, width)?;
        match record.width {
            Some(w) => format!("Resized {} to {}px", record.name, w),
            None => format!("Reset {} to natural size", record.name),
        }
    };
    dn.note.touch();
    store.save_note(&dn.note)?;
    debug!(note = %dn.note.id, id = attachment_id, ?width, "resize");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_notes(vec![dn]))
}

pub fn rename<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    attachment_id: &str,
    name: String,
) -> Result<CmdResult> {
    let mut dn = resolve_note(store, selector)?;
    dn.note.attachments.rename(attachment_id, name.clone())?;

    // Structured notes rebuild their flat projection from current catalog names.
    if let Some(list) = &dn.note.structured_content {
        dn.note.content = blocks::to_flat(list, &dn.note.attachments);
    }
    dn.note.touch();
    store.save_note(&dn.note)?;
    debug!(note = %dn.note.id, id = attachment_id, "rename");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed {} to {}",
        attachment_id, name
    )));
    Ok(result.with_affected_notes(vec![dn]))
}

fn reference_count(note: &Note, attachment_id: &str) -> usize {
    match &note.structured_content {
        Some(list) => blocks::referenced_ids(list)
            .into_iter()
            .filter(|id| id.as_str() == attachment_id)
            .count(),
        None => codec::decode(&note.content)
            .iter()
            .filter_map(|s| s.attachment_id())
            .filter(|id| id.as_str() == attachment_id)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::commands::view;
    use crate::commands::ViewUnit;
    use crate::embed::RenderVariant;
    use crate::model::AttachmentKind;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::test_utils::{attachment, image};

    fn fixture() -> StoreFixture {
        let mut note = Note::new("N", "a[File: a.png](att-1)b[File: doc.pdf](att-2)");
        note.attachments.push(image("att-1", "a.png"));
        note.attachments
            .push(attachment("att-2", "doc.pdf", AttachmentKind::Document));
        StoreFixture::new().with_note(note)
    }

    fn stored(fixture: &StoreFixture) -> Note {
        fixture.store.list_notes().unwrap().remove(0)
    }

    #[test]
    fn detach_leaves_content_dangling() {
        let mut fixture = fixture();
        let result = detach(&mut fixture.store, &NoteSelector::Index(1), "att-1").unwrap();

        let note = stored(&fixture);
        assert!(!note.attachments.contains("att-1"));
        assert_eq!(note.content, "a[File: a.png](att-1)b[File: doc.pdf](att-2)");
        assert!(result.messages[1].content.contains("1 reference"));

        let view = view::run(&fixture.store, &NoteSelector::Index(1)).unwrap();
        assert_eq!(view.views[0].missing, 1);
        assert!(matches!(
            &view.views[0].units[1],
            ViewUnit::Missing { attachment_id } if attachment_id.as_str() == "att-1"
        ));
    }

    #[test]
    fn detach_unknown_id() {
        let mut fixture = fixture();
        let err = detach(&mut fixture.store, &NoteSelector::Index(1), "att-9").unwrap_err();
        assert!(matches!(err, QuireError::AttachmentNotFound(_)));
    }

    #[test]
    fn resize_image_visible_in_view() {
        let mut fixture = fixture();
        resize(&mut fixture.store, &NoteSelector::Index(1), "att-1", Some(240)).unwrap();

        let note = stored(&fixture);
        assert_eq!(note.content, "a[File: a.png](att-1)b[File: doc.pdf](att-2)");
        let view = view::run(&fixture.store, &NoteSelector::Index(1)).unwrap();
        assert!(matches!(
            &view.views[0].units[1],
            ViewUnit::Attachment { variant: RenderVariant::Image { width: Some(240) }, .. }
        ));

        let result = resize(&mut fixture.store, &NoteSelector::Index(1), "att-1", None).unwrap();
        assert!(result.messages[0].content.contains("natural size"));
        assert_eq!(stored(&fixture).attachments.get("att-1").unwrap().width, None);
    }

    #[test]
    fn resize_non_image_is_rejected() {
        let mut fixture = fixture();
        let err = resize(&mut fixture.store, &NoteSelector::Index(1), "att-2", Some(10))
            .unwrap_err();
        assert!(matches!(err, QuireError::NotAnImage(_)));
    }

    #[test]
    fn rename_keeps_flat_markers() {
        let mut fixture = fixture();
        rename(&mut fixture.store, &NoteSelector::Index(1), "att-1", "beach.png".into()).unwrap();

        let note = stored(&fixture);
        assert_eq!(note.attachments.get("att-1").unwrap().name, "beach.png");
        assert_eq!(note.content, "a[File: a.png](att-1)b[File: doc.pdf](att-2)");
    }

    #[test]
    fn rename_refreshes_structured_projection() {
        let mut note = Note::new("N", "[File: a.png](att-1)");
        note.attachments.push(image("att-1", "a.png"));
        note.structured_content = Some(vec![Block::Attachment {
            attachment_id: "att-1".into(),
        }]);
        let mut fixture = StoreFixture::new().with_note(note);

        rename(&mut fixture.store, &NoteSelector::Index(1), "att-1", "beach.png".into()).unwrap();
        assert_eq!(stored(&fixture).content, "[File: beach.png](att-1)");
    }
}
