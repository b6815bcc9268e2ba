//! Import notes from files.
//!
//! | Input | Result |
//! |-------|--------|
//! | `.json` | One note snapshot, loaded as is |
//! | `.tar.gz`, `.tgz` | Every `.json` snapshot in an archive made by export |
//! | `.md`, `.markdown` | A structured note parsed from Markdown |
//! | anything else | A flat note holding the file's text |
//!
//! Directories are walked one level deep. The title of a Markdown or text note
//! is the file stem. An imported snapshot whose id is already taken gets a
//! fresh id, so imports never overwrite existing notes.

use crate::blocks;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::markdown::parse_markdown;
use crate::model::Note;
use crate::store::DataStore;
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S, paths: Vec<PathBuf>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut taken: HashSet<Uuid> = store.list_notes()?.iter().map(|n| n.id).collect();
    let mut imported_count = 0;

    for path in paths {
        let files = if path.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(&path).map_err(QuireError::Io)? {
                let sub_path = entry.map_err(QuireError::Io)?.path();
                if sub_path.is_file() {
                    files.push(sub_path);
                }
            }
            files.sort();
            files
        } else if path.is_file() {
            vec![path]
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
            continue;
        };

        for file in files {
            match read_notes(&file) {
                Ok(notes) => {
                    for mut note in notes {
                        if !taken.insert(note.id) {
                            note.id = Uuid::new_v4();
                            taken.insert(note.id);
                        }
                        store.save_note(&note)?;
                        imported_count += 1;
                    }
                    result.add_message(CmdMessage::info(format!("Imported: {}", file.display())));
                }
                Err(err) => {
                    warn!(path = %file.display(), error = %err, "import failed");
                    result.add_message(CmdMessage::error(format!(
                        "Failed to import {}: {}",
                        file.display(),
                        err
                    )));
                }
            }
        }
    }

    info!(count = imported_count, "import finished");
    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        imported_count
    )));
    Ok(result)
}

fn read_notes(path: &Path) -> Result<Vec<Note>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        return read_archive(File::open(path).map_err(QuireError::Io)?);
    }

    let raw = fs::read_to_string(path).map_err(QuireError::Io)?;
    if name.ends_with(".json") {
        return Ok(vec![serde_json::from_str(&raw).map_err(QuireError::Serialization)?]);
    }

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported")
        .to_string();
    if name.ends_with(".md") || name.ends_with(".markdown") {
        Ok(vec![note_from_markdown(title, &raw)])
    } else {
        Ok(vec![Note::new(title, raw)])
    }
}

/// Parse Markdown into blocks and derive the flat content from them.
pub fn note_from_markdown(title: String, source: &str) -> Note {
    let list = parse_markdown(source);
    let mut note = Note::new(title, String::new());
    note.content = blocks::to_flat(&list, &note.attachments);
    note.structured_content = Some(list);
    note
}

fn read_archive<R: Read>(reader: R) -> Result<Vec<Note>> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut notes = Vec::new();
    for entry in archive.entries().map_err(QuireError::Io)? {
        let mut entry = entry.map_err(QuireError::Io)?;
        let is_json = entry
            .path()
            .map_err(QuireError::Io)?
            .extension()
            .is_some_and(|ext| ext == "json");
        if !is_json {
            continue;
        }
        let mut raw = String::new();
        entry.read_to_string(&mut raw).map_err(QuireError::Io)?;
        notes.push(serde_json::from_str(&raw).map_err(QuireError::Serialization)?);
    }
    Ok(notes)
}
