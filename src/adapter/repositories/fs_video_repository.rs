//! Filesystem Video Repository Implementation
//!
//! VideoRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::video_file::VideoFile;
use crate::domain::repositories::video_repository::VideoRepository;

/// ファイルシステムベースの動画リポジトリ
pub struct FsVideoRepository {
    videos_dir: PathBuf,
    uploaded_dir: PathBuf,
}

impl FsVideoRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `videos_dir` - 監視ディレクトリ
    /// * `uploaded_dir` - アップロード済みディレクトリ
    pub fn new(videos_dir: impl Into<PathBuf>, uploaded_dir: impl Into<PathBuf>) -> Self {
        Self {
            videos_dir: videos_dir.into(),
            uploaded_dir: uploaded_dir.into(),
        }
    }

    fn ensure_dirs_sync(videos_dir: &Path, uploaded_dir: &Path) -> Result<()> {
        for dir in [videos_dir, uploaded_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// 監視ディレクトリ直下の通常ファイルを列挙する（内部実装）
    fn list_videos_sync(videos_dir: &Path) -> Result<Vec<VideoFile>> {
        if !videos_dir.exists() {
            warn!("Videos directory does not exist: {}", videos_dir.display());
            return Ok(Vec::new());
        }

        let mut videos = Vec::new();

        for entry in WalkDir::new(videos_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", videos_dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).map_err(io::Error::from);
            if let Some(video) = Self::video_from_stat(entry.path(), size) {
                videos.push(video);
            }
        }

        Ok(videos)
    }

    /// statに失敗したエントリ（列挙後に削除されたファイルなど）はスキップする
    fn video_from_stat(path: &Path, size: io::Result<u64>) -> Option<VideoFile> {
        let size_bytes = match size {
            Ok(size_bytes) => size_bytes,
            Err(e) => {
                warn!("Skipping {}: failed to stat: {}", path.display(), e);
                return None;
            }
        };

        let video = VideoFile::from_path(path, size_bytes);
        if video.is_none() {
            warn!("Skipping non UTF-8 file name: {}", path.display());
        }
        video
    }

    /// アップロード済みディレクトリへ移動する（内部実装）
    ///
    /// renameが失敗した場合（別ファイルシステムなど）はコピー後に削除する
    fn archive_sync(source: &Path, uploaded_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let destination = uploaded_dir.join(file_name);
        fs::create_dir_all(uploaded_dir)
            .with_context(|| format!("Failed to create directory {}", uploaded_dir.display()))?;

        if let Err(rename_err) = fs::rename(source, &destination) {
            warn!(
                "Rename of {} failed ({}), falling back to copy",
                source.display(),
                rename_err
            );
            fs::copy(source, &destination).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    destination.display()
                )
            })?;
            fs::remove_file(source)
                .with_context(|| format!("Failed to remove {}", source.display()))?;
        }

        info!("Moved {} to {}", source.display(), destination.display());
        Ok(destination)
    }
}

#[async_trait]
impl VideoRepository for FsVideoRepository {
    async fn ensure_dirs(&self) -> Result<()> {
        let videos_dir = self.videos_dir.clone();
        let uploaded_dir = self.uploaded_dir.clone();
        tokio::task::spawn_blocking(move || Self::ensure_dirs_sync(&videos_dir, &uploaded_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn list_videos(&self) -> Result<Vec<VideoFile>> {
        let videos_dir = self.videos_dir.clone();
        tokio::task::spawn_blocking(move || Self::list_videos_sync(&videos_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn archive(&self, video: &VideoFile) -> Result<PathBuf> {
        let source = video.path.clone();
        let uploaded_dir = self.uploaded_dir.clone();
        let file_name = video.file_name.clone();
        tokio::task::spawn_blocking(move || Self::archive_sync(&source, &uploaded_dir, &file_name))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
