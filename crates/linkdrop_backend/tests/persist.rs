use std::fs;

use linkdrop_backend::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn streamed_write_lands_only_on_commit() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin("clip.mp4").unwrap();
    pending.write_chunk(b"hello ").unwrap();
    pending.write_chunk(b"world").unwrap();
    assert_eq!(pending.len(), 11);
    assert!(!temp.path().join("clip.mp4").exists());

    let saved = pending.commit().unwrap();
    assert_eq!(saved, temp.path().join("clip.mp4"));
    assert_eq!(fs::read_to_string(&saved).unwrap(), "hello world");
}

#[test]
fn dropped_pending_file_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin("partial.gif").unwrap();
    pending.write_chunk(b"GIF8").unwrap();
    drop(pending);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.begin("doc.md").is_err());
    assert!(!file_path.with_file_name("doc.md").exists());
}
