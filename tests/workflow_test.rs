//! Workflow Integration Tests
//!
//! UploadWorker の統合テスト

use anyhow::Result;
use async_trait::async_trait;
use reelsync::adapter::config::Config;
use reelsync::domain::entities::video_file::VideoFile;
use reelsync::domain::entities::video_metadata::VideoMetadata;
use reelsync::domain::repositories::upload_repository::{UploadReceipt, UploadRepository};
use reelsync::driver::{CycleOutcome, UploadWorker};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// アップロードされたタイトルを記録するフェイク
#[derive(Default)]
struct RecordingUploader {
    titles: Mutex<Vec<String>>,
}

impl RecordingUploader {
    fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadRepository for RecordingUploader {
    async fn upload(&self, _video: &VideoFile, metadata: &VideoMetadata) -> Result<UploadReceipt> {
        let mut titles = self.titles.lock().unwrap();
        titles.push(metadata.title.clone());
        Ok(UploadReceipt::new(
            format!("vid-{}", titles.len()),
            metadata.title.clone(),
        ))
    }
}

/// テスト用の設定を作成
fn create_test_config(dir: &Path) -> Config {
    let config_path = dir.join("reelsync.json");
    let config_content = format!(
        r#"{{
  "videos_dir": "{videos}",
  "uploaded_dir": "{uploaded}",
  "state_file": "{state}",
  "interval_secs": 1,
  "extension": "mp4",
  "privacy_status": "unlisted"
}}"#,
        videos = dir.join("videos").display(),
        uploaded = dir.join("uploaded").display(),
        state = dir.join("state/upload-state.json").display(),
    );
    fs::write(&config_path, config_content).unwrap();

    Config::load(config_path.to_str().unwrap()).unwrap()
}

/// テスト用の動画ディレクトリを作成
fn create_videos(dir: &Path, names: &[&str]) {
    let videos_dir = dir.join("videos");
    fs::create_dir_all(&videos_dir).unwrap();
    for name in names {
        fs::write(videos_dir.join(name), format!("fake video {}", name)).unwrap();
    }
}

#[tokio::test]
async fn test_cycles_upload_one_file_each_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    create_videos(temp_dir.path(), &["b.mp4", "a.MP4", "notes.txt"]);

    let uploader = Arc::new(RecordingUploader::default());
    let worker = UploadWorker::new(config, Some(uploader.clone() as Arc<dyn UploadRepository>));

    let first = worker.run_cycle().await;
    let second = worker.run_cycle().await;
    let third = worker.run_cycle().await;

    assert_eq!(
        first,
        CycleOutcome::Uploaded {
            file_name: "a.MP4".to_string(),
            video_id: "vid-1".to_string()
        }
    );
    assert_eq!(
        second,
        CycleOutcome::Uploaded {
            file_name: "b.mp4".to_string(),
            video_id: "vid-2".to_string()
        }
    );
    assert_eq!(third, CycleOutcome::Idle);

    assert_eq!(uploader.titles(), vec!["a.MP4", "b.mp4"]);
    assert!(temp_dir.path().join("uploaded/a.MP4").exists());
    assert!(temp_dir.path().join("uploaded/b.mp4").exists());
    // 対象外の拡張子はそのまま残る
    assert!(temp_dir.path().join("videos/notes.txt").exists());

    let state = fs::read_to_string(temp_dir.path().join("state/upload-state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(state["total_uploaded"], 2);
    assert_eq!(state["uploaded_files"]["b.mp4"]["video_id"], "vid-2");
}

#[tokio::test]
async fn test_previously_uploaded_file_is_only_moved() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    create_videos(temp_dir.path(), &["a.mp4"]);
    let size = fs::metadata(temp_dir.path().join("videos/a.mp4")).unwrap().len();

    // 前回アップロード後に移動だけ失敗した状態を再現
    let state_dir = temp_dir.path().join("state");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(
        state_dir.join("upload-state.json"),
        format!(
            r#"{{"last_upload_timestamp":"2024-12-25T10:00:00Z","last_video_id":"old-id","total_uploaded":1,
               "uploaded_files":{{"a.mp4":{{"video_id":"old-id","size_bytes":{},"uploaded_at":"2024-12-25T10:00:00Z"}}}}}}"#,
            size
        ),
    )
    .unwrap();
    fs::create_dir_all(temp_dir.path().join("uploaded")).unwrap();

    let uploader = Arc::new(RecordingUploader::default());
    let worker = UploadWorker::new(config, Some(uploader.clone() as Arc<dyn UploadRepository>));

    let outcome = worker.run_cycle().await;

    assert_eq!(
        outcome,
        CycleOutcome::Archived {
            file_name: "a.mp4".to_string(),
            video_id: "old-id".to_string()
        }
    );
    assert!(uploader.titles().is_empty());
    assert!(temp_dir.path().join("uploaded/a.mp4").exists());
    assert!(!temp_dir.path().join("videos/a.mp4").exists());
}

#[tokio::test]
async fn test_dry_run_once_does_not_move_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    create_videos(temp_dir.path(), &["a.mp4"]);

    let worker = UploadWorker::new(config, None);
    let result = worker.run(true).await;

    assert!(
        result.is_ok(),
        "Worker should succeed in dry-run mode, but got: {:?}",
        result
    );
    assert!(temp_dir.path().join("videos/a.mp4").exists());
    assert!(temp_dir.path().join("uploaded").is_dir());
    assert!(!temp_dir.path().join("state/upload-state.json").exists());
}

#[tokio::test]
async fn test_run_once_with_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());

    let uploader = Arc::new(RecordingUploader::default());
    let worker = UploadWorker::new(config, Some(uploader.clone() as Arc<dyn UploadRepository>));
    let result = worker.run(true).await;

    assert!(
        result.is_ok(),
        "Worker should handle empty video directory, but got: {:?}",
        result
    );
    assert!(uploader.titles().is_empty());
}

#[tokio::test]
async fn test_corrupt_state_file_does_not_block_uploads() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    create_videos(temp_dir.path(), &["a.mp4"]);
    let state_dir = temp_dir.path().join("state");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(state_dir.join("upload-state.json"), "{ truncated").unwrap();

    let uploader = Arc::new(RecordingUploader::default());
    let worker = UploadWorker::new(config, Some(uploader.clone() as Arc<dyn UploadRepository>));

    let outcome = worker.run_cycle().await;

    assert_eq!(
        outcome,
        CycleOutcome::Uploaded {
            file_name: "a.mp4".to_string(),
            video_id: "vid-1".to_string()
        }
    );
    assert!(temp_dir.path().join("uploaded/a.mp4").exists());
    // 壊れたファイルは退避され、新しい台帳が書かれる
    assert_eq!(
        fs::read_to_string(state_dir.join("upload-state.json.corrupt")).unwrap(),
        "{ truncated"
    );
    let state = fs::read_to_string(state_dir.join("upload-state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(state["uploaded_files"]["a.mp4"]["video_id"], "vid-1");
}
