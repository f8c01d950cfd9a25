//! Worker Loop Orchestration
//!
//! ポーリングループのオーケストレーション

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::adapter::auth::load_youtube_auth;
use crate::adapter::config::Config;
use crate::adapter::repositories::fs_video_repository::FsVideoRepository;
use crate::adapter::repositories::json_state_repository::JsonStateRepository;
use crate::adapter::repositories::youtube_upload_repository::YouTubeUploadRepository;
use crate::adapter::youtube::client::YouTubeClient;
use crate::application::dto::upload_settings::UploadSettings;
use crate::application::use_cases::discover_videos::DiscoverVideosUseCase;
use crate::application::use_cases::upload_video::{UploadOutcome, UploadVideoUseCase};
use crate::domain::repositories::upload_repository::UploadRepository;
use crate::domain::repositories::video_repository::VideoRepository;

/// 1サイクルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 候補がなかった
    Idle,
    /// dry-runで選ばれた
    WouldUpload { file_name: String },
    Uploaded { file_name: String, video_id: String },
    /// 以前アップロード済みだったため移動のみ行った
    Archived { file_name: String, video_id: String },
    /// エラーはログに出力済み。ファイルは次のサイクルで再試行される
    Failed {
        file_name: Option<String>,
        error: String,
    },
}

type UploadUseCase = UploadVideoUseCase<FsVideoRepository, dyn UploadRepository, JsonStateRepository>;

/// Upload Worker
pub struct UploadWorker {
    config: Config,
    settings: UploadSettings,
    video_repository: Arc<FsVideoRepository>,
    discover_use_case: DiscoverVideosUseCase<FsVideoRepository>,
    upload_use_case: Option<UploadUseCase>,
}

impl UploadWorker {
    /// Create a worker with an injected uploader; `None` runs in dry-run mode
    pub fn new(config: Config, uploader: Option<Arc<dyn UploadRepository>>) -> Self {
        let video_repository = Arc::new(FsVideoRepository::new(
            config.videos_dir(),
            config.uploaded_dir(),
        ));
        let state_repository = Arc::new(JsonStateRepository::new());

        let discover_use_case = DiscoverVideosUseCase::new(video_repository.clone());
        let upload_use_case = uploader.map(|uploader| {
            UploadVideoUseCase::new(video_repository.clone(), uploader, state_repository.clone())
        });

        Self {
            settings: config.upload_settings(),
            config,
            video_repository,
            discover_use_case,
            upload_use_case,
        }
    }

    /// Create a worker uploading to YouTube with credentials from disk/environment
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn connect(config: Config) -> Result<Self> {
        let auth = load_youtube_auth(&config).await?;
        let client = YouTubeClient::new(auth, config.chunk_size_bytes);
        let uploader: Arc<dyn UploadRepository> =
            Arc::new(YouTubeUploadRepository::new(Arc::new(client)));
        info!("✓ Created YouTube client");

        Ok(Self::new(config, Some(uploader)))
    }

    pub fn is_dry_run(&self) -> bool {
        self.upload_use_case.is_none()
    }

    /// Pick the first candidate and upload it. Never fails: errors are logged
    pub async fn run_cycle(&self) -> CycleOutcome {
        let candidates = match self.discover_use_case.execute(&self.settings.extension).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Failed to list videos: {:#}", e);
                return CycleOutcome::Failed {
                    file_name: None,
                    error: format!("{:#}", e),
                };
            }
        };

        let Some(video) = candidates.into_iter().next() else {
            info!("No videos in folder. Waiting...");
            return CycleOutcome::Idle;
        };

        let Some(upload_use_case) = &self.upload_use_case else {
            info!(
                "DRY RUN MODE - Would upload {} ({} bytes) as {}",
                video.file_name, video.size_bytes, self.settings.privacy
            );
            return CycleOutcome::WouldUpload {
                file_name: video.file_name,
            };
        };

        match upload_use_case.execute(&video, &self.settings).await {
            Ok(UploadOutcome::Uploaded {
                receipt,
                archived_to,
            }) => {
                info!(
                    "✓ {} is live at {} (moved to {})",
                    receipt.title,
                    receipt.watch_url(),
                    archived_to.display()
                );
                CycleOutcome::Uploaded {
                    file_name: video.file_name,
                    video_id: receipt.video_id,
                }
            }
            Ok(UploadOutcome::AlreadyUploaded { video_id, .. }) => CycleOutcome::Archived {
                file_name: video.file_name,
                video_id,
            },
            Err(e) => {
                warn!("Upload failed: {:#}", e);
                CycleOutcome::Failed {
                    file_name: Some(video.file_name),
                    error: format!("{:#}", e),
                }
            }
        }
    }

    /// Run cycles until interrupted (or once).
    ///
    /// Ctrl-C lets the current cycle finish so an uploaded video is always recorded.
    pub async fn run(&self, once: bool) -> Result<()> {
        self.video_repository.ensure_dirs().await?;

        info!("✓ Using configuration:");
        info!("  Videos: {}", self.config.videos_dir());
        info!("  Uploaded: {}", self.config.uploaded_dir());
        info!("  Extension: .{}", self.settings.extension.trim_start_matches('.'));
        info!("  Interval: {}s", self.config.interval_secs);
        info!("  Dry run: {}", self.is_dry_run());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping after the current cycle");
                let _ = shutdown_tx.send(true);
            }
        });

        self.run_until(once, shutdown_rx).await;
        Ok(())
    }

    async fn run_until(&self, once: bool, mut shutdown: watch::Receiver<bool>) {
        let interval = Duration::from_secs(self.config.interval_secs);

        loop {
            self.run_cycle().await;
            if once || *shutdown.borrow() {
                break;
            }

            info!("Next cycle in {}s", interval.as_secs());
            tokio::select! {
                _ = sleep(interval) => {}
                Ok(()) = shutdown.changed() => break,
            }
        }

        info!("Worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    use crate::domain::entities::video_file::VideoFile;
    use crate::domain::entities::video_metadata::VideoMetadata;
    use crate::domain::repositories::upload_repository::UploadReceipt;

    struct StaticUploader {
        fail: bool,
    }

    #[async_trait]
    impl UploadRepository for StaticUploader {
        async fn upload(&self, video: &VideoFile, metadata: &VideoMetadata) -> Result<UploadReceipt> {
            if self.fail {
                bail!("503 Service Unavailable");
            }
            Ok(UploadReceipt::new(
                format!("id-{}", video.file_name),
                metadata.title.clone(),
            ))
        }
    }

    fn config(temp_dir: &TempDir) -> Config {
        Config {
            videos_dir: temp_dir.path().join("videos").to_string_lossy().to_string(),
            uploaded_dir: temp_dir.path().join("uploaded").to_string_lossy().to_string(),
            state_file: temp_dir.path().join("state.json").to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_run_cycle_idle() {
        let temp_dir = TempDir::new().unwrap();
        let worker = UploadWorker::new(config(&temp_dir), None);
        worker.video_repository.ensure_dirs().await.unwrap();

        assert_eq!(worker.run_cycle().await, CycleOutcome::Idle);
    }

    #[tokio::test]
    async fn test_run_cycle_dry_run_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let worker = UploadWorker::new(config(&temp_dir), None);
        worker.video_repository.ensure_dirs().await.unwrap();
        fs::write(temp_dir.path().join("videos/a.mp4"), b"x").unwrap();

        assert!(worker.is_dry_run());
        assert_eq!(
            worker.run_cycle().await,
            CycleOutcome::WouldUpload {
                file_name: "a.mp4".to_string()
            }
        );
        assert!(temp_dir.path().join("videos/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_run_cycle_uploads_first_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let uploader: Arc<dyn UploadRepository> = Arc::new(StaticUploader { fail: false });
        let worker = UploadWorker::new(config(&temp_dir), Some(uploader));
        worker.video_repository.ensure_dirs().await.unwrap();
        fs::write(temp_dir.path().join("videos/b.mp4"), b"x").unwrap();
        fs::write(temp_dir.path().join("videos/a.mp4"), b"x").unwrap();

        assert_eq!(
            worker.run_cycle().await,
            CycleOutcome::Uploaded {
                file_name: "a.mp4".to_string(),
                video_id: "id-a.mp4".to_string()
            }
        );
        assert!(temp_dir.path().join("uploaded/a.mp4").exists());
        assert!(temp_dir.path().join("videos/b.mp4").exists());
    }

    #[tokio::test]
    async fn test_run_cycle_failure_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        let uploader: Arc<dyn UploadRepository> = Arc::new(StaticUploader { fail: true });
        let worker = UploadWorker::new(config(&temp_dir), Some(uploader));
        worker.video_repository.ensure_dirs().await.unwrap();
        fs::write(temp_dir.path().join("videos/a.mp4"), b"x").unwrap();

        let outcome = worker.run_cycle().await;

        match outcome {
            CycleOutcome::Failed { file_name, error } => {
                assert_eq!(file_name.as_deref(), Some("a.mp4"));
                assert!(error.contains("503"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(temp_dir.path().join("videos/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_interrupt_during_cycle_finishes_upload() {
        let temp_dir = TempDir::new().unwrap();
        let uploader: Arc<dyn UploadRepository> = Arc::new(StaticUploader { fail: false });
        let worker = UploadWorker::new(config(&temp_dir), Some(uploader));
        worker.video_repository.ensure_dirs().await.unwrap();
        fs::write(temp_dir.path().join("videos/a.mp4"), b"x").unwrap();
        fs::write(temp_dir.path().join("videos/b.mp4"), b"x").unwrap();

        // 割り込みはサイクル開始前に届いている
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), worker.run_until(false, shutdown_rx))
            .await
            .expect("worker should stop without sleeping");

        assert!(temp_dir.path().join("uploaded/a.mp4").exists());
        assert!(temp_dir.path().join("state.json").exists());
        // 次のサイクルは実行されない
        assert!(temp_dir.path().join("videos/b.mp4").exists());
    }

    #[tokio::test]
    async fn test_interrupt_during_sleep_stops() {
        let temp_dir = TempDir::new().unwrap();
        let worker = UploadWorker::new(config(&temp_dir), None);
        worker.video_repository.ensure_dirs().await.unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let stopper = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            shutdown_tx.send(true).unwrap();
        };

        let (stopped, _) = tokio::join!(
            tokio::time::timeout(Duration::from_secs(5), worker.run_until(false, shutdown_rx)),
            stopper
        );

        assert!(stopped.is_ok(), "worker should stop while sleeping");
    }

    #[tokio::test]
    async fn test_run_once_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let worker = UploadWorker::new(config(&temp_dir), None);

        worker.run(true).await.unwrap();

        assert!(temp_dir.path().join("videos").is_dir());
        assert!(temp_dir.path().join("uploaded").is_dir());
    }
}
