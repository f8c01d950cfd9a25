//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::config::Config;

/// フォルダ内の動画をYouTubeへ1本ずつアップロードするワーカー
#[derive(Parser, Debug, Clone)]
#[command(name = "reelsync")]
#[command(about = "Upload videos from a folder to YouTube, one per cycle", long_about = None)]
pub struct Args {
    /// Dry run mode - pick the next video but don't authenticate, upload or move it
    #[arg(long)]
    pub dry_run: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Config file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "./reelsync.json")]
    pub config: String,

    /// Directory scanned for videos
    #[arg(long)]
    pub videos_dir: Option<String>,

    /// Directory uploaded videos are moved to
    #[arg(long)]
    pub uploaded_dir: Option<String>,

    /// Seconds to sleep between cycles
    #[arg(long, env = "REELSYNC_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,
}

impl Args {
    /// CLI引数で設定を上書き
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.videos_dir {
            config.videos_dir = dir.clone();
        }
        if let Some(dir) = &self.uploaded_dir {
            config.uploaded_dir = dir.clone();
        }
        if let Some(secs) = self.interval_secs {
            config.interval_secs = secs;
        }
    }
}
