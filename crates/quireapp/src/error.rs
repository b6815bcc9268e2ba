use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("Segment {index} out of range (note has {len} segments)")]
    SegmentOutOfRange { index: usize, len: usize },

    #[error("Segment {0} is not editable text")]
    NotEditable(usize),

    #[error("Attachment {0} is not an image")]
    NotAnImage(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QuireError>;
