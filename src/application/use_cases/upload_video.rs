//! # Upload Video Use Case
//!
//! 動画1本のアップロードと移動のユースケース

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::dto::upload_settings::UploadSettings;
use crate::domain::entities::video_file::VideoFile;
use crate::domain::repositories::state_repository::StateRepository;
use crate::domain::repositories::upload_repository::{UploadReceipt, UploadRepository};
use crate::domain::repositories::video_repository::VideoRepository;

/// アップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// アップロードして移動した
    Uploaded {
        receipt: UploadReceipt,
        archived_to: PathBuf,
    },
    /// 以前のサイクルでアップロード済みだったため移動のみ行った
    AlreadyUploaded {
        video_id: String,
        archived_to: PathBuf,
    },
}

/// 動画アップロードユースケース
///
/// 動画をアップロードし、状態を記録してからアップロード済みディレクトリへ移動する
pub struct UploadVideoUseCase<V, U, S>
where
    V: VideoRepository + ?Sized,
    U: UploadRepository + ?Sized,
    S: StateRepository + ?Sized,
{
    video_repository: Arc<V>,
    upload_repository: Arc<U>,
    state_repository: Arc<S>,
}

impl<V, U, S> UploadVideoUseCase<V, U, S>
where
    V: VideoRepository + ?Sized,
    U: UploadRepository + ?Sized,
    S: StateRepository + ?Sized,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `video_repository` - 動画リポジトリ
    /// * `upload_repository` - アップロードリポジトリ
    /// * `state_repository` - 状態リポジトリ
    pub fn new(
        video_repository: Arc<V>,
        upload_repository: Arc<U>,
        state_repository: Arc<S>,
    ) -> Self {
        Self {
            video_repository,
            upload_repository,
            state_repository,
        }
    }

    /// 動画をアップロードして移動する
    ///
    /// 状態ファイルに同名・同サイズの記録がある場合はアップロードせずに移動のみ行う
    ///
    /// # Errors
    ///
    /// アップロード、状態の保存、ファイルの移動のいずれかに失敗した場合にエラーを返す。
    /// その場合ファイルは監視ディレクトリに残る
    pub async fn execute(
        &self,
        video: &VideoFile,
        settings: &UploadSettings,
    ) -> Result<UploadOutcome> {
        let mut state = self.state_repository.load(&settings.state_path).await?;

        if let Some(video_id) = state.uploaded_video_id(&video.file_name, video.size_bytes) {
            let video_id = video_id.to_string();
            warn!(
                "{} was already uploaded as {}, moving it without re-uploading",
                video.file_name, video_id
            );
            let archived_to = self.video_repository.archive(video).await?;
            return Ok(UploadOutcome::AlreadyUploaded {
                video_id,
                archived_to,
            });
        }

        let metadata = settings.metadata_for(video);
        let receipt = self
            .upload_repository
            .upload(video, &metadata)
            .await
            .with_context(|| format!("Failed to upload {}", video.file_name))?;
        info!("Uploaded {} -> {}", video.file_name, receipt.video_id);

        // 移動より先に記録する
        state.record_upload(
            video.file_name.clone(),
            video.size_bytes,
            receipt.video_id.clone(),
            Utc::now().to_rfc3339(),
        );
        self.state_repository
            .save(&settings.state_path, &state)
            .await?;

        let archived_to = self.video_repository.archive(video).await?;

        Ok(UploadOutcome::Uploaded {
            receipt,
            archived_to,
        })
    }
}
