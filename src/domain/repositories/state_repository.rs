//! # State Repository Trait
//!
//! アップロード状態の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// アップロード済みファイルの記録
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadRecord {
    pub video_id: String,
    pub size_bytes: u64,
    pub uploaded_at: String,
}

/// アップロード状態
///
/// どのファイルが既にアップロードされたかを追跡するための状態。
/// アップロード成功後にファイル移動が失敗した場合の二重アップロードを防ぐ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadState {
    /// 最後のアップロードタイムスタンプ
    pub last_upload_timestamp: Option<String>,
    /// 最後にアップロードされた動画ID
    pub last_video_id: Option<String>,
    /// アップロード総数
    pub total_uploaded: u64,
    /// ファイル名ごとのアップロード記録
    pub uploaded_files: BTreeMap<String, UploadRecord>,
}

impl UploadState {
    /// 新しいアップロード状態を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 同名・同サイズのファイルがアップロード済みなら動画IDを返す
    pub fn uploaded_video_id(&self, file_name: &str, size_bytes: u64) -> Option<&str> {
        self.uploaded_files
            .get(file_name)
            .filter(|record| record.size_bytes == size_bytes)
            .map(|record| record.video_id.as_str())
    }

    /// アップロード済みファイルを記録
    pub fn record_upload(
        &mut self,
        file_name: String,
        size_bytes: u64,
        video_id: String,
        timestamp: String,
    ) {
        self.uploaded_files.insert(
            file_name,
            UploadRecord {
                video_id: video_id.clone(),
                size_bytes,
                uploaded_at: timestamp.clone(),
            },
        );
        self.last_video_id = Some(video_id);
        self.last_upload_timestamp = Some(timestamp);
        self.total_uploaded += 1;
    }
}

/// 状態リポジトリ
///
/// アップロード状態の永続化を担当するリポジトリ
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// 状態を読み込む
    ///
    /// ファイルが存在しない場合は空の状態を返す
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはパースに失敗した場合にエラーを返す
    async fn load(&self, path: &str) -> Result<UploadState>;

    /// 状態を保存する
    ///
    /// # Errors
    ///
    /// ファイルの書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, state: &UploadState) -> Result<()>;
}
