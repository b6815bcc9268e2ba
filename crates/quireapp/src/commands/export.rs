//! Export notes.
//!
//! - [`run`] writes a `.tar.gz` archive holding one full JSON snapshot per note.
//!   Content keeps its markers verbatim and the catalog travels with it, so an
//!   archive imports back losslessly.
//! - [`run_markdown`] renders a single note as Markdown. Flat notes go through
//!   the legacy → structured conversion first; nothing is stored.

use crate::blocks;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::index::{DisplayNote, NoteSelector};
use crate::markdown::to_markdown;
use crate::store::DataStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::helpers::{resolve_note, resolve_notes};

pub const ARCHIVE_DIR: &str = "quire";

/// Default archive file name, timestamped.
pub fn archive_name() -> String {
    format!("quire-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H-%M-%S"))
}

/// Export the selected notes (all notes when `selectors` is empty) to `dest`.
pub fn run<S: DataStore>(store: &S, selectors: &[NoteSelector], dest: &Path) -> Result<CmdResult> {
    let notes = resolve_notes(store, selectors)?;

    if notes.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No notes to export."));
        return Ok(res);
    }

    let file = File::create(dest).map_err(QuireError::Io)?;
    write_archive(file, &notes)?;
    info!(path = %dest.display(), count = notes.len(), "exported archive");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} note(s) to {}",
        notes.len(),
        dest.display()
    )));
    Ok(result.with_note_paths(vec![PathBuf::from(dest)]))
}

pub fn write_archive<W: Write>(writer: W, notes: &[DisplayNote]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for dn in notes {
        let entry_name = format!(
            "{}/{}-{}.json",
            ARCHIVE_DIR,
            sanitize_filename(&dn.note.title),
            &dn.note.id.to_string()[..8]
        );
        let content = serde_json::to_string_pretty(&dn.note).map_err(QuireError::Serialization)?;

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(QuireError::Io)?;
    }

    tar.into_inner()
        .map_err(QuireError::Io)?
        .finish()
        .map_err(QuireError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// Render one note as a Markdown document, returned in `CmdResult::output`.
pub fn run_markdown<S: DataStore>(store: &S, selector: &NoteSelector) -> Result<CmdResult> {
    let dn = resolve_note(store, selector)?;
    let note = &dn.note;

    let body = match &note.structured_content {
        Some(list) => to_markdown(list, &note.attachments),
        None => to_markdown(&blocks::from_flat(&note.content), &note.attachments),
    };
    let document = format!("# {}\n\n{}", note.title, body);

    Ok(CmdResult {
        output: Some(document),
        ..Default::default()
    })
}
