//! # Video Repository Trait
//!
//! 動画ファイルの列挙と移動を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::entities::video_file::VideoFile;

/// 動画リポジトリ
///
/// 監視ディレクトリの列挙と、アップロード済みディレクトリへの移動を担当する
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// 監視ディレクトリとアップロード済みディレクトリを作成する
    async fn ensure_dirs(&self) -> Result<()>;

    /// 監視ディレクトリ直下のファイルを列挙する
    ///
    /// # Returns
    ///
    /// 列挙された全ファイル（拡張子によるフィルタリングは行わない）
    async fn list_videos(&self) -> Result<Vec<VideoFile>>;

    /// 動画をアップロード済みディレクトリへ移動する
    ///
    /// 同名のファイルが既に存在する場合は置き換える
    ///
    /// # Returns
    ///
    /// 移動先のパス
    async fn archive(&self, video: &VideoFile) -> Result<PathBuf>;
}
