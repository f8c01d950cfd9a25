//! JSON State Repository Implementation
//!
//! StateRepositoryのJSON実装（アップロード状態をJSONファイルで永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::state_repository::{StateRepository, UploadState};

/// JSONファイルベースの状態リポジトリ
pub struct JsonStateRepository;

impl JsonStateRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ファイルから状態を読み込む（同期処理）
    fn load_sync(path: &str) -> Result<UploadState> {
        let path = Path::new(path);

        if !path.exists() {
            debug!("No existing upload state found, creating new state");
            return Ok(UploadState::new());
        }

        let content = fs::read_to_string(path).context("Failed to read upload state file")?;

        let state: UploadState = match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => return Self::quarantine(path, e),
        };

        debug!(
            "Loaded upload state: {} videos previously uploaded",
            state.total_uploaded
        );

        Ok(state)
    }

    /// 壊れた状態ファイルを退避して空の状態から再開する
    fn quarantine(path: &Path, err: serde_json::Error) -> Result<UploadState> {
        let mut corrupt_path = path.as_os_str().to_owned();
        corrupt_path.push(".corrupt");
        let corrupt_path = PathBuf::from(corrupt_path);

        warn!(
            "Upload state {} is corrupt ({}), moving it to {} and starting fresh",
            path.display(),
            err,
            corrupt_path.display()
        );
        fs::rename(path, &corrupt_path).with_context(|| {
            format!("Failed to move corrupt upload state to {}", corrupt_path.display())
        })?;

        Ok(UploadState::new())
    }

    /// ファイルに状態を保存する（同期処理）
    ///
    /// 一時ファイルに書いてからrenameするため、途中で落ちても既存の状態は壊れない
    fn save_sync(path: &str, state: &UploadState) -> Result<()> {
        let path = Path::new(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create state directory")?;
            }
        }

        let json =
            serde_json::to_string_pretty(state).context("Failed to serialize upload state")?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).context("Failed to write upload state file")?;
        fs::rename(&tmp_path, path).context("Failed to replace upload state file")?;

        info!(
            "Saved upload state: {} total videos uploaded",
            state.total_uploaded
        );

        Ok(())
    }
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn load(&self, path: &str) -> Result<UploadState> {
        let path = path.to_string();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save(&self, path: &str, state: &UploadState) -> Result<()> {
        let path = path.to_string();
        let state = state.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &state))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for JsonStateRepository {
    fn default() -> Self {
        Self::new()
    }
}
