//! Upload Progress
//!
//! レジュマブルアップロードのチャンクサイズ指定と進捗ログ

use log::info;
use youtube3::client::{ContentRange, Delegate};

/// Chunk size used when the config leaves it unset (8 MiB)
pub const DEFAULT_CHUNK_SIZE: u64 = 8 * 1024 * 1024;

/// Delegate passed to the upload call; logs before each chunk is sent
pub struct UploadProgress {
    file_name: String,
    chunk_size: u64,
}

impl UploadProgress {
    pub fn new(file_name: impl Into<String>, chunk_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            chunk_size,
        }
    }
}

impl Delegate for UploadProgress {
    fn chunk_size(&mut self) -> u64 {
        self.chunk_size
    }

    fn cancel_chunk_upload(&mut self, chunk: &ContentRange) -> bool {
        if let Some(range) = &chunk.range {
            info!(
                "Uploading {}: {}%",
                self.file_name,
                progress_percent(range.first, chunk.total_length)
            );
        }
        false
    }
}

/// 送信済みバイト数の割合（0〜100）
pub fn progress_percent(done: u64, total: u64) -> u64 {
    if total == 0 {
        return 100;
    }
    let percent = u128::from(done) * 100 / u128::from(total);
    percent.min(100) as u64
}
