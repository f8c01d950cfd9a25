//! # Upload Settings DTO
//!
//! アップロード設定のData Transfer Object

use crate::domain::entities::video_file::VideoFile;
use crate::domain::entities::video_metadata::{PrivacyStatus, VideoMetadata};

/// アップロード設定
///
/// 動画の選択とメタデータ生成に必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// 対象とする拡張子（例: "mp4"）
    pub extension: String,
    /// 動画の説明文
    pub description: String,
    /// 動画のタグ
    pub tags: Vec<String>,
    /// YouTubeカテゴリID
    pub category_id: Option<String>,
    /// 公開設定
    pub privacy: PrivacyStatus,
    /// 状態ファイルのパス
    pub state_path: String,
}

impl UploadSettings {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use reelsync::application::dto::upload_settings::UploadSettings;
    /// use reelsync::domain::entities::video_metadata::PrivacyStatus;
    ///
    /// let settings = UploadSettings::new(
    ///     "mp4".to_string(),
    ///     String::new(),
    ///     vec![],
    ///     None,
    ///     PrivacyStatus::Public,
    ///     "upload-state.json".to_string(),
    /// );
    ///
    /// assert_eq!(settings.extension, "mp4");
    /// assert_eq!(settings.privacy, PrivacyStatus::Public);
    /// ```
    pub fn new(
        extension: String,
        description: String,
        tags: Vec<String>,
        category_id: Option<String>,
        privacy: PrivacyStatus,
        state_path: String,
    ) -> Self {
        Self {
            extension,
            description,
            tags,
            category_id,
            privacy,
            state_path,
        }
    }

    /// 動画ファイルに対するメタデータを生成
    pub fn metadata_for(&self, video: &VideoFile) -> VideoMetadata {
        VideoMetadata::for_file(
            video,
            &self.description,
            &self.tags,
            self.category_id.as_deref(),
            self.privacy,
        )
    }
}
