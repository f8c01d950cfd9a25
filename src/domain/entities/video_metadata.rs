//! # VideoMetadata Value Object
//!
//! アップロード時に送信する動画メタデータ

use serde::{Deserialize, Serialize};
use std::fmt;

use super::video_file::VideoFile;

/// 公開設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Unlisted,
    Private,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Public => "public",
            PrivacyStatus::Unlisted => "unlisted",
            PrivacyStatus::Private => "private",
        }
    }
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 動画メタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub privacy: PrivacyStatus,
}

impl VideoMetadata {
    /// ファイル名をタイトルとしたメタデータを作成
    pub fn for_file(
        video: &VideoFile,
        description: &str,
        tags: &[String],
        category_id: Option<&str>,
        privacy: PrivacyStatus,
    ) -> Self {
        Self {
            title: video.title().to_string(),
            description: description.to_string(),
            tags: tags.to_vec(),
            category_id: category_id.map(str::to_string),
            privacy,
        }
    }
}
