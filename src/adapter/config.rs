//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::application::dto::upload_settings::UploadSettings;
use crate::domain::entities::video_metadata::PrivacyStatus;

/// Resumable upload chunks must be a multiple of this size.
pub const CHUNK_GRANULARITY: u64 = 256 * 1024;

/// 1 hour 37 minutes
pub const DEFAULT_INTERVAL_SECS: u64 = 5820;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub videos_dir: String,
    pub uploaded_dir: String,
    pub state_file: String,
    pub interval_secs: u64,
    pub extension: String,

    // Video metadata
    pub privacy_status: PrivacyStatus,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: Option<String>,

    /// Resumable upload chunk size; None uses 8 MiB
    pub chunk_size_bytes: Option<u64>,

    // Authentication
    pub client_secret_path: String,
    pub token_path: String,
    /// Token cache written by the browser consent flow
    pub token_cache_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            videos_dir: "videos".to_string(),
            uploaded_dir: "uploaded".to_string(),
            state_file: "upload-state.json".to_string(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            extension: "mp4".to_string(),
            privacy_status: PrivacyStatus::Public,
            description: String::new(),
            tags: Vec::new(),
            category_id: None,
            chunk_size_bytes: None,
            client_secret_path: "client_secret.json".to_string(),
            token_path: "token.json".to_string(),
            token_cache_path: "token-cache.json".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// Falls back to defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(&expand_path(path)).exists() {
            Self::load(path)
        } else {
            log::info!("Config file {} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            bail!("interval_secs must be greater than zero");
        }
        if self.extension.trim_start_matches('.').is_empty() {
            bail!("extension must not be empty");
        }
        if let Some(chunk) = self.chunk_size_bytes {
            if chunk == 0 || chunk % CHUNK_GRANULARITY != 0 {
                bail!(
                    "chunk_size_bytes must be a positive multiple of {} (got {})",
                    CHUNK_GRANULARITY,
                    chunk
                );
            }
        }
        Ok(())
    }

    pub fn videos_dir(&self) -> String {
        expand_path(&self.videos_dir)
    }

    pub fn uploaded_dir(&self) -> String {
        expand_path(&self.uploaded_dir)
    }

    pub fn state_file(&self) -> String {
        expand_path(&self.state_file)
    }

    pub fn client_secret_path(&self) -> String {
        expand_path(&self.client_secret_path)
    }

    pub fn token_path(&self) -> String {
        expand_path(&self.token_path)
    }

    pub fn token_cache_path(&self) -> String {
        expand_path(&self.token_cache_path)
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings::new(
            self.extension.clone(),
            self.description.clone(),
            self.tags.clone(),
            self.category_id.clone(),
            self.privacy_status,
            self.state_file(),
        )
    }
}

/// Expand `~` and environment variables, keeping the raw path on lookup failure
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|p| p.to_string())
        .unwrap_or_else(|_| path.to_string())
}
