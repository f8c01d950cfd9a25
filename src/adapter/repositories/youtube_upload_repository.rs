//! YouTube Upload Repository Implementation
//!
//! UploadRepositoryのYouTube実装

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::adapter::youtube::client::VideoInserter;
use crate::adapter::youtube::models::video_resource;
use crate::domain::entities::video_file::VideoFile;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::repositories::upload_repository::{UploadReceipt, UploadRepository};

/// YouTubeアップロードリポジトリ
pub struct YouTubeUploadRepository {
    inserter: Arc<dyn VideoInserter>,
}

impl YouTubeUploadRepository {
    /// 新しいリポジトリを作成
    pub fn new(inserter: Arc<dyn VideoInserter>) -> Self {
        Self { inserter }
    }
}

#[async_trait]
impl UploadRepository for YouTubeUploadRepository {
    async fn upload(&self, video: &VideoFile, metadata: &VideoMetadata) -> Result<UploadReceipt> {
        let resource = video_resource(metadata);

        info!(
            "Uploading {} ({} bytes, {})",
            video.file_name, video.size_bytes, metadata.privacy
        );
        let video_id = self.inserter.insert(&video.path, &resource).await?;

        Ok(UploadReceipt::new(video_id, metadata.title.clone()))
    }
}
