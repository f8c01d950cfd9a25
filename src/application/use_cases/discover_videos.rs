//! # Discover Videos Use Case
//!
//! アップロード候補の発見ユースケース

use anyhow::Result;
use std::sync::Arc;

use crate::domain::entities::video_file::VideoFile;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::services::selection::SelectionService;

/// アップロード候補発見ユースケース
///
/// 監視ディレクトリから拡張子が一致する動画をファイル名順に返す
pub struct DiscoverVideosUseCase<R: VideoRepository + ?Sized> {
    video_repository: Arc<R>,
}

impl<R: VideoRepository + ?Sized> DiscoverVideosUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `video_repository` - 動画リポジトリ
    pub fn new(video_repository: Arc<R>) -> Self {
        Self { video_repository }
    }

    /// アップロード候補を発見する
    ///
    /// # Arguments
    ///
    /// * `extension` - 対象とする拡張子
    ///
    /// # Returns
    ///
    /// ファイル名順に並んだアップロード候補
    ///
    /// # Errors
    ///
    /// ディレクトリの読み取りに失敗した場合にエラーを返す
    pub async fn execute(&self, extension: &str) -> Result<Vec<VideoFile>> {
        let videos = self.video_repository.list_videos().await?;
        Ok(SelectionService::candidates(videos, extension))
    }
}
