//! # Upload Repository Trait
//!
//! 動画のアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::video_file::VideoFile;
use crate::domain::entities::video_metadata::VideoMetadata;

/// アップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// 動画ホスティング側で採番された動画ID
    pub video_id: String,
    /// 送信したタイトル
    pub title: String,
}

impl UploadReceipt {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
        }
    }

    /// 公開URLを返します。
    ///
    /// # 例
    ///
    /// ```
    /// use reelsync::domain::repositories::upload_repository::UploadReceipt;
    ///
    /// let receipt = UploadReceipt::new("dQw4w9WgXcQ", "clip.mp4");
    /// assert_eq!(receipt.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    /// ```
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// アップロードリポジトリ
///
/// 動画1本のアップロードを担当するリポジトリ
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// 動画をアップロード
    ///
    /// # Arguments
    ///
    /// * `video` - アップロードする動画ファイル
    /// * `metadata` - タイトル・説明・公開設定
    ///
    /// # Errors
    ///
    /// アップロードに失敗した場合にエラーを返す
    async fn upload(&self, video: &VideoFile, metadata: &VideoMetadata) -> Result<UploadReceipt>;
}
