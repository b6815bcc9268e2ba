use crate::blocks;
use crate::commands::{CmdMessage, CmdResult, DoctorFinding};
use crate::error::Result;
use crate::marker;
use crate::model::{AttachmentId, Note};
use crate::store::DataStore;
use std::collections::HashSet;
use tracing::warn;

use super::helpers::indexed_notes;

/// Report referential drift between content and catalogs. Never mutates.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for dn in indexed_notes(store)? {
        let finding = inspect(&dn.note, dn.index);
        if finding.dangling.is_empty() && finding.unreferenced.is_empty() {
            continue;
        }
        for id in &finding.dangling {
            warn!(note = %dn.note.id, attachment = %id, "dangling attachment reference");
        }
        result.findings.push(finding);
    }

    if result.findings.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        let dangling: usize = result.findings.iter().map(|f| f.dangling.len()).sum();
        let unreferenced: usize = result.findings.iter().map(|f| f.unreferenced.len()).sum();
        result.add_message(CmdMessage::warning(format!(
            "{} note(s) with drift: {} dangling reference(s), {} unreferenced attachment(s).",
            result.findings.len(),
            dangling,
            unreferenced
        )));
    }
    Ok(result)
}

fn inspect(note: &Note, index: usize) -> DoctorFinding {
    let mut referenced: Vec<AttachmentId> = match &note.structured_content {
        Some(list) => blocks::referenced_ids(list).into_iter().cloned().collect(),
        None => marker::referenced_ids(&note.content),
    };
    let mut seen = HashSet::new();
    referenced.retain(|id| seen.insert(id.clone()));

    let dangling = referenced
        .iter()
        .filter(|id| !note.attachments.contains(id.as_str()))
        .cloned()
        .collect();
    let unreferenced = note
        .attachments
        .ids()
        .filter(|id| !seen.contains(*id))
        .cloned()
        .collect();

    DoctorFinding {
        index,
        title: note.title.clone(),
        dangling,
        unreferenced,
    }
}
