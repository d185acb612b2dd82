use std::fs;

use studio_engine::{ensure_output_dir, save_image, AtomicFileWriter, ExportError};
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
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("edit.png", b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "edit.png");
    assert_eq!(fs::read(&first).unwrap(), b"hello");

    let second = writer.write("edit.png", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("edit.png", b"data").is_err());
    assert!(!file_path.with_file_name("edit.png").exists());
}

#[test]
fn saved_image_is_decoded_with_extension_from_mime() {
    let temp = TempDir::new().unwrap();
    let path = save_image(
        temp.path(),
        "enhanced-image",
        "2026-10-19T08:30:00Z",
        "data:image/jpeg;base64,AAE=",
    )
    .unwrap();

    assert_eq!(
        path.file_name().unwrap(),
        "enhanced-image-2026-10-19T08-30-00Z.jpg"
    );
    assert_eq!(fs::read(&path).unwrap(), vec![0u8, 1]);
}

#[test]
fn non_data_url_is_not_saved() {
    let temp = TempDir::new().unwrap();
    let err = save_image(temp.path(), "gemini-edit", "t", "https://example.com/a.png").unwrap_err();
    assert!(matches!(err, ExportError::Payload(_)));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
