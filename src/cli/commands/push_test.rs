use crate::cli::commands::push::*;
use crate::config::{ProjectConfig, Settings, SyncSettings};
use crate::sync::test_support::FakeClient;
use crate::sync::{NoProgress, PushRequest};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn settings(locale_root: PathBuf) -> Settings {
    Settings {
        project: ProjectConfig {
            project_id: "123.abc".to_string(),
            api_token: "token".to_string(),
            default_locale: "en".to_string(),
        },
        sync: SyncSettings {
            locale_paths: vec![locale_root],
            ..Default::default()
        },
    }
}

#[test]
fn test_upload_notice_mentions_interval() {
    let notice = upload_notice(Duration::from_secs(5));
    assert!(notice.contains("one upload every 5 seconds"));
}

#[tokio::test(start_paused = true)]
async fn test_push_reports_uploads() {
    let locale_root = TempDir::new().unwrap();
    fs::write(locale_root.path().join("default.pot"), "msgid \"a\"\n").unwrap();
    let client = FakeClient::new();
    let request = PushRequest {
        locales: vec!["en".to_string(), "fr".to_string()],
        ..Default::default()
    };

    let output = push(
        &client,
        &settings(locale_root.path().to_path_buf()),
        &request,
        &mut NoProgress,
    )
    .await
    .unwrap();

    assert!(output.contains("All Done. 2 upload(s) completed"));
    assert!(output.contains("default.pot"));
    assert!(output.contains("en, fr"));
    assert_eq!(client.import_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_push_with_nothing_to_upload() {
    let locale_root = TempDir::new().unwrap();
    let client = FakeClient::new();

    let output = push(
        &client,
        &settings(locale_root.path().to_path_buf()),
        &PushRequest::default(),
        &mut NoProgress,
    )
    .await
    .unwrap();

    assert!(output.contains("Nothing to push"));
    assert!(client.import_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_push_rejection_error_names_locale() {
    let locale_root = TempDir::new().unwrap();
    fs::write(locale_root.path().join("default.pot"), "msgid \"a\"\n").unwrap();
    let client = FakeClient {
        reject_at: Some(0),
        ..FakeClient::new()
    };

    let result = push(
        &client,
        &settings(locale_root.path().to_path_buf()),
        &PushRequest::default(),
        &mut NoProgress,
    )
    .await;

    let error = result.unwrap_err().to_string();
    assert!(error.starts_with("en - Could not upload file"), "got: {}", error);
    assert!(error.contains("Invalid file format"));
}
