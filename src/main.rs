//! Reelsync - Folder to YouTube upload worker

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use reelsync::adapter::config::Config;
use reelsync::driver::{Args, UploadWorker};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;
    args.apply_to(&mut config);
    config.validate()?;

    // Credentials are only needed when actually uploading
    let worker = if args.dry_run {
        UploadWorker::new(config, None)
    } else {
        UploadWorker::connect(config).await?
    };

    worker.run(args.once).await
}
