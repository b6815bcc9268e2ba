//! # Attachment Ingestion
//!
//! Reads raw files into [`Attachment`] records. This is the only suspending step
//! in the content core: it must finish (or fail per file) before its records are
//! appended to a catalog and referenced from text.
//!
//! Every file is handled independently. A missing, unreadable or oversized file
//! becomes an [`IngestFailure`] in the report and contributes no attachment; the
//! rest of the batch carries on. Nothing is retried, and a started read always
//! runs to completion or failure.
//!
//! Uploaded payloads are stored inline as `data:<mime>;base64,<payload>` locators.
//! The kind is inferred from the file extension; anything unrecognized is a
//! document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Attachment, AttachmentKind};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("not a regular file")]
    NotAFile,

    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct IngestFailure {
    pub path: PathBuf,
    pub reason: IngestError,
}

/// Outcome of one ingestion batch. `attachments` keeps input order.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub attachments: Vec<Attachment>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub async fn ingest_files<P: AsRef<Path>>(paths: &[P], max_bytes: u64) -> IngestReport {
    let mut report = IngestReport::default();
    for path in paths {
        let path = path.as_ref();
        match ingest_file(path, max_bytes).await {
            Ok(attachment) => {
                debug!(path = %path.display(), id = %attachment.id, kind = %attachment.kind, "ingested");
                report.attachments.push(attachment);
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "skipping attachment");
                report.failures.push(IngestFailure {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }
    report
}

pub async fn ingest_file(path: &Path, max_bytes: u64) -> Result<Attachment, IngestError> {
    let meta = tokio::fs::metadata(path).await?;
    if !meta.is_file() {
        return Err(IngestError::NotAFile);
    }
    if meta.len() > max_bytes {
        return Err(IngestError::TooLarge {
            size: meta.len(),
            limit: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let size = bytes.len() as u64;
    if size > max_bytes {
        // The file grew between stat and read.
        return Err(IngestError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "attachment".to_string());

    let kind = kind_for_extension(&extension);
    let locator = format!(
        "data:{};base64,{}",
        mime_for_extension(&extension),
        STANDARD.encode(&bytes)
    );
    Ok(Attachment::new(name, kind, locator).with_size(size))
}

pub fn kind_for_extension(extension: &str) -> AttachmentKind {
    match extension {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "bmp" | "avif" | "heic" => {
            AttachmentKind::Image
        }
        "mp4" | "mov" | "webm" | "mkv" | "avi" | "m4v" => AttachmentKind::Video,
        "mp3" | "wav" | "ogg" | "flac" | "aac" | "m4a" | "opus" => AttachmentKind::Audio,
        _ => AttachmentKind::Document,
    }
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "opus" => "audio/ogg",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "m4a" => "audio/mp4",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn kinds_from_extensions() {
        assert_eq!(kind_for_extension("png"), AttachmentKind::Image);
        assert_eq!(kind_for_extension("webm"), AttachmentKind::Video);
        assert_eq!(kind_for_extension("flac"), AttachmentKind::Audio);
        assert_eq!(kind_for_extension("pdf"), AttachmentKind::Document);
        assert_eq!(kind_for_extension(""), AttachmentKind::Document);
    }

    #[tokio::test]
    async fn ingests_file_as_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Photo.PNG");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let att = ingest_file(&path, 1024).await.unwrap();
        assert_eq!(att.name, "Photo.PNG");
        assert_eq!(att.kind, AttachmentKind::Image);
        assert_eq!(att.size, Some(3));
        assert_eq!(att.url, "data:image/png;base64,AQID");
        assert!(att.id.as_str().starts_with("att-"));
    }

    #[tokio::test]
    async fn failures_do_not_block_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("a.txt");
        let big = dir.path().join("big.mp3");
        let missing = dir.path().join("nope.png");
        let other = dir.path().join("b.wav");
        fs::write(&small, "hi").unwrap();
        fs::write(&big, vec![0u8; 64]).unwrap();
        fs::write(&other, "ok").unwrap();

        let report = ingest_files(&[&small, &big, &missing, &other], 16).await;

        let names: Vec<&str> = report.attachments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.wav"]);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(
            report.failures[0].reason,
            IngestError::TooLarge { size: 64, limit: 16 }
        ));
        assert!(matches!(report.failures[1].reason, IngestError::Io(_)));
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let report = ingest_files(&[dir.path()], 1024).await;
        assert!(report.attachments.is_empty());
        assert!(matches!(report.failures[0].reason, IngestError::NotAFile));
    }
}
