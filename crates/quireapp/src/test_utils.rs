use crate::model::{Attachment, AttachmentId, AttachmentKind};
#[cfg(test)]
use crate::store::fs::FileStore;
#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use tempfile::TempDir;

/// An attachment record with a fixed id, for deterministic fixtures.
pub fn attachment(id: &str, name: &str, kind: AttachmentKind) -> Attachment {
    let url = match kind {
        AttachmentKind::Url => "https://example.com".to_string(),
        other => format!("data:application/octet-stream;base64,{}", other.as_str()),
    };
    let mut att = Attachment::new(name, kind, url);
    att.id = AttachmentId::from(id);
    att
}

pub fn image(id: &str, name: &str) -> Attachment {
    attachment(id, name, AttachmentKind::Image)
}

#[cfg(test)]
pub struct TestEnv {
    // Keeps the directory alive for the duration of the test.
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

#[cfg(test)]
impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}
