use quireapp::blocks::Block;
use quireapp::error::QuireError;
use quireapp::model::{Attachment, AttachmentKind, Note};
use quireapp::store::fs::FileStore;
use quireapp::store::DataStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("notes"));
    (dir, store)
}

#[test]
fn test_save_and_reload_preserves_catalog_and_blocks() {
    let (_dir, mut store) = setup();

    let photo = Attachment::new("photo.png", AttachmentKind::Image, "data:image/png;base64,AAAA");
    let mut note = Note::new("Trip", format!("[File: photo.png]({})", photo.id));
    note.structured_content = Some(vec![
        Block::Heading {
            level: 1,
            text: "Trip".into(),
        },
        Block::attachment(&photo),
    ]);
    note.attachments.push(photo.clone());
    store.save_note(&note).unwrap();

    let loaded = store.get_note(&note.id).unwrap();
    assert_eq!(loaded, note);
    assert_eq!(loaded.attachments.get(photo.id.as_str()), Some(&photo));
}

#[test]
fn test_atomic_write_leaves_no_tmp_files() {
    let (_dir, mut store) = setup();
    let note = Note::new("A", "body");
    store.save_note(&note).unwrap();
    store.save_note(&note).unwrap();

    for entry in fs::read_dir(store.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
    assert_eq!(store.list_notes().unwrap().len(), 1);
}

#[test]
fn test_on_disk_format_is_camel_case_json() {
    let (_dir, mut store) = setup();
    let mut note = Note::new("A", "x");
    note.structured_content = Some(vec![Block::paragraph("x")]);
    store.save_note(&note).unwrap();

    let raw = fs::read_to_string(store.note_path(&note.id).unwrap()).unwrap();
    assert!(raw.contains("\"structuredContent\""));
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"type\": \"paragraph\""));
}

#[test]
fn test_delete_then_get_is_not_found() {
    let (_dir, mut store) = setup();
    let note = Note::new("A", "x");
    store.save_note(&note).unwrap();
    store.delete_note(&note.id).unwrap();

    assert!(matches!(
        store.get_note(&note.id),
        Err(QuireError::NoteNotFound(id)) if id == note.id
    ));
    assert!(store.list_notes().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_skipped_in_listing() {
    let (_dir, mut store) = setup();
    let note = Note::new("Good", "x");
    store.save_note(&note).unwrap();
    fs::write(
        store.root().join(format!("note-{}.json", uuid::Uuid::new_v4())),
        "{ not json",
    )
    .unwrap();

    let notes = store.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Good");
}
