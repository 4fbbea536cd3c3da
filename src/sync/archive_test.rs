use crate::sync::SyncError;
use crate::sync::archive::*;
use crate::sync::test_support::{FakeClient, zip_bytes, zip_entry_names};
use std::fs;
use tempfile::TempDir;

fn write_zip(dir: &TempDir, name: &str, entries: &[(&str, &str)]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, zip_bytes(entries)).unwrap();
    path
}

#[test]
fn test_rename_only_touches_template_entries() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_zip(
        &temp_dir,
        "bundle.zip",
        &[("en.pot", "msgid \"a\""), ("readme.txt", "hello")],
    );

    let renamed = rename_template_entries(&path).unwrap();

    assert_eq!(renamed, 1);
    assert_eq!(zip_entry_names(&path), vec!["en.po", "readme.txt"]);
}

#[test]
fn test_rename_keeps_locale_folders() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_zip(
        &temp_dir,
        "bundle.zip",
        &[
            ("fr/", ""),
            ("fr/LC_MESSAGES/", ""),
            ("fr/LC_MESSAGES/default.pot", "msgid \"a\""),
            ("de/LC_MESSAGES/default.pot", "msgid \"b\""),
        ],
    );

    let renamed = rename_template_entries(&path).unwrap();

    assert_eq!(renamed, 2);
    assert_eq!(
        zip_entry_names(&path),
        vec![
            "fr/",
            "fr/LC_MESSAGES/",
            "fr/LC_MESSAGES/default.po",
            "de/LC_MESSAGES/default.po"
        ]
    );
}

#[test]
fn test_rename_preserves_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_zip(&temp_dir, "bundle.zip", &[("en.pot", "msgid \"kept\"")]);
    let dest = temp_dir.path().join("out");

    rename_template_entries(&path).unwrap();
    extract_archive(&path, &dest).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("en.po")).unwrap(),
        "msgid \"kept\""
    );
}

#[test]
fn test_rename_with_nothing_to_rename_leaves_archive() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_zip(&temp_dir, "bundle.zip", &[("en.po", "x")]);
    let before = fs::read(&path).unwrap();

    assert_eq!(rename_template_entries(&path).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_rename_rejects_corrupt_archive() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.zip");
    fs::write(&path, b"definitely not a zip").unwrap();

    let result = rename_template_entries(&path);
    assert!(matches!(result, Err(SyncError::Extraction { .. })));
}

#[test]
fn test_extract_overwrites_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_zip(&temp_dir, "bundle.zip", &[("fr/default.po", "new")]);
    let dest = temp_dir.path().join("Locale");
    fs::create_dir_all(dest.join("fr")).unwrap();
    fs::write(dest.join("fr/default.po"), "old").unwrap();
    fs::write(dest.join("fr/keep.po"), "untouched").unwrap();

    let entries = extract_archive(&path, &dest).unwrap();

    assert_eq!(entries, vec!["fr/default.po"]);
    assert_eq!(fs::read_to_string(dest.join("fr/default.po")).unwrap(), "new");
    assert_eq!(
        fs::read_to_string(dest.join("fr/keep.po")).unwrap(),
        "untouched"
    );
}

#[tokio::test]
async fn test_process_extracts_and_removes_temp_archive() {
    let staging = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let client = FakeClient {
        archive: Some(zip_bytes(&[("en.pot", "msgid \"a\""), ("readme.txt", "hi")])),
        ..FakeClient::new()
    };
    let processor = ArchiveProcessor::with_temp_dir(staging.path().to_path_buf());

    let result = processor
        .process(&client, "https://assets.local/bundle.zip", dest.path())
        .await
        .unwrap();

    assert_eq!(result.entries, vec!["en.po", "readme.txt"]);
    assert_eq!(result.renamed, 1);
    assert!(dest.path().join("en.po").exists());
    assert!(dest.path().join("readme.txt").exists());
    assert!(!dest.path().join("en.pot").exists());
    assert!(!result.archive_path.exists());
    assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 0);
    assert_eq!(
        *client.downloads.lock().unwrap(),
        vec!["https://assets.local/bundle.zip".to_string()]
    );
}

#[tokio::test]
async fn test_temp_archive_is_timestamped() {
    let staging = TempDir::new().unwrap();
    let client = FakeClient {
        archive: Some(zip_bytes(&[("en.pot", "")])),
        ..FakeClient::new()
    };
    let processor = ArchiveProcessor::with_temp_dir(staging.path().to_path_buf());

    let archive = processor.download(&client, "u").await.unwrap();
    let name = archive
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    assert!(name.starts_with("translations_"));
    assert!(name.ends_with(".zip"));
    assert!(archive.path().starts_with(staging.path()));
}

#[tokio::test]
async fn test_download_failure_status() {
    let staging = TempDir::new().unwrap();
    let client = FakeClient::new();
    let processor = ArchiveProcessor::with_temp_dir(staging.path().to_path_buf());

    let result = processor
        .process(&client, "https://assets.local/gone.zip", staging.path())
        .await;

    match result {
        Err(SyncError::Download { url, status }) => {
            assert_eq!(url, "https://assets.local/gone.zip");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_corrupt_bundle_still_cleans_up() {
    let staging = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let client = FakeClient {
        archive: Some(b"<html>not a zip</html>".to_vec()),
        ..FakeClient::new()
    };
    let processor = ArchiveProcessor::with_temp_dir(staging.path().to_path_buf());

    let result = processor.process(&client, "u", dest.path()).await;

    assert!(matches!(result, Err(SyncError::Extraction { .. })));
    assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 0);
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}
