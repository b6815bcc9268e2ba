//! Adding attachments to a note.
//!
//! Records are always appended to the catalog first, in batch order, and only
//! then referenced from content. A reference is never written for a record the
//! catalog does not hold.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::ingest::IngestReport;
use crate::marker::Marker;
use crate::model::{Attachment, AttachmentKind};
use crate::mutation::Units;
use crate::store::DataStore;
use tracing::info;
use url::Url;

use super::helpers::{open_editor, resolve_note};

/// Attach the successfully ingested files of `report` to a note.
pub fn attach<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    report: IngestReport,
    upgrade: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for failure in &report.failures {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: {}",
            failure.path.display(),
            failure.reason
        )));
    }

    if report.attachments.is_empty() {
        result.add_message(CmdMessage::info("Nothing to attach."));
        return Ok(result);
    }

    let mut dn = resolve_note(store, selector)?;
    let batch = report.attachments;
    dn.note.attachments.extend(batch.iter().cloned());
    open_editor(&mut dn.note, upgrade).insert_attachments(&batch);
    store.save_note(&dn.note)?;
    info!(note = %dn.note.id, count = batch.len(), "attached files");

    for att in &batch {
        result.add_message(CmdMessage::success(format!(
            "Attached {} ({}) as {}",
            att.name, att.kind, att.id
        )));
    }
    Ok(result.with_affected_notes(vec![dn]))
}

/// Attach a URL. The display name defaults to the URL's host.
pub fn link<S: DataStore>(
    store: &mut S,
    selector: &NoteSelector,
    url: &str,
    name: Option<String>,
    upgrade: bool,
) -> Result<CmdResult> {
    let url = url.trim();
    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default_link_name(url));
    let attachment = Attachment::new(name, AttachmentKind::Url, url);

    let mut dn = resolve_note(store, selector)?;
    dn.note.attachments.push(attachment.clone());
    {
        let mut editor = open_editor(&mut dn.note, upgrade);
        if matches!(editor.units(), Units::Structured(_)) {
            editor.insert_attachments(std::slice::from_ref(&attachment));
        } else {
            editor.insert_text(Marker::for_attachment(&attachment).to_string());
        }
    }
    store.save_note(&dn.note)?;
    info!(note = %dn.note.id, id = %attachment.id, "linked url");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Linked {} as {}",
        attachment.name, attachment.id
    )));
    Ok(result.with_affected_notes(vec![dn]))
}

fn default_link_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
