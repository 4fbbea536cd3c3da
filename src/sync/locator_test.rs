use crate::sync::locator::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn touch(dir: &std::path::Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "msgid \"\"\nmsgstr \"\"\n").unwrap();
    path
}

#[test]
fn test_translation_name_swaps_suffix() {
    assert_eq!(to_translation_name("en.pot").as_deref(), Some("en.po"));
    assert_eq!(
        to_translation_name("fr/LC_MESSAGES/default.pot").as_deref(),
        Some("fr/LC_MESSAGES/default.po")
    );
    assert_eq!(to_translation_name("readme.txt"), None);
    assert_eq!(to_translation_name("default.po"), None);
    assert_eq!(to_translation_name("pot.txt"), None);
}

#[test]
fn test_finds_only_templates_sorted_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let b = touch(root, "validation.pot");
    let a = touch(root, "default.pot");
    touch(root, "default.po");
    touch(root, "notes.txt");
    touch(root, ".hidden.pot");
    fs::create_dir(root.join("nested.pot")).unwrap();

    let found = find_templates(&[root.to_path_buf()]).unwrap();
    assert_eq!(found, vec![a, b]);
}

#[test]
fn test_does_not_recurse() {
    let temp_dir = TempDir::new().unwrap();
    let sub = temp_dir.path().join("fr");
    fs::create_dir(&sub).unwrap();
    touch(&sub, "default.pot");

    let found = find_templates(&[temp_dir.path().to_path_buf()]).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_directory_then_filename_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let z = touch(first.path(), "zeta.pot");
    let a = touch(second.path(), "alpha.pot");

    let found = find_templates(&[first.path().to_path_buf(), second.path().to_path_buf()]).unwrap();
    assert_eq!(found, vec![z, a]);
}

#[test]
fn test_missing_directory_yields_empty() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    let found = find_templates(&[missing]).unwrap();
    assert!(found.is_empty());
}
