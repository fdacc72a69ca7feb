use std::fs;

use jobboard_engine::{ensure_data_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());
    ensure_data_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("bookmarks.json", "[]").unwrap();
    assert_eq!(first.file_name().unwrap(), "bookmarks.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("bookmarks.json", "[{\"id\":1}]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[{\"id\":1}]");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("bookmarks.json", "[]").is_err());
    assert!(!file_path.with_file_name("bookmarks.json").exists());
}

#[test]
fn data_dir_check_rejects_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("plain_file");
    fs::write(&file_path, "x").unwrap();

    assert!(matches!(
        ensure_data_dir(&file_path),
        Err(PersistError::DataDir(_))
    ));
}
