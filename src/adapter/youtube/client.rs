//! YouTube Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::Path;
use youtube3::api::Video;
use youtube3::client::GetToken;
use youtube3::hyper::client::HttpConnector;
use youtube3::hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use youtube3::{hyper, YouTube};

#[cfg(test)]
use mockall::automock;

use super::models::describe_api_error;
use super::progress::{UploadProgress, DEFAULT_CHUNK_SIZE};
use crate::adapter::auth::YOUTUBE_UPLOAD_SCOPE;

const VIDEO_CONTENT_TYPE: &str = "video/*";

/// Trait for video insert operations
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoInserter: Send + Sync {
    /// Upload the file at `path` and return the new video id
    async fn insert(&self, path: &Path, video: &Video) -> Result<String>;
}

/// YouTube Data API client performing resumable uploads
pub struct YouTubeClient {
    hub: YouTube<HttpsConnector<HttpConnector>>,
    chunk_size: u64,
}

impl YouTubeClient {
    pub fn new<A: GetToken + 'static>(auth: A, chunk_size: Option<u64>) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .expect("failed to load native root certificates")
            .https_or_http()
            .enable_http1()
            .build();
        let hub = YouTube::new(hyper::Client::builder().build(connector), auth);

        Self {
            hub,
            chunk_size: chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        }
    }

    /// Send API requests to another root URL (must end with `/`)
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.hub.root_url(root_url.into());
        self
    }
}

#[async_trait]
impl VideoInserter for YouTubeClient {
    async fn insert(&self, path: &Path, video: &Video) -> Result<String> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        if size == 0 {
            bail!("{} is empty", path.display());
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut progress = UploadProgress::new(file_name, self.chunk_size);
        let mime_type: mime::Mime = VIDEO_CONTENT_TYPE
            .parse()
            .context("Invalid video content type")?;

        let (_, created) = self
            .hub
            .videos()
            .insert(video.clone())
            .add_part("snippet")
            .add_part("status")
            .add_scope(YOUTUBE_UPLOAD_SCOPE)
            .delegate(&mut progress)
            .upload_resumable(file, mime_type)
            .await
            .map_err(|e| anyhow!("YouTube upload failed: {}", describe_upload_error(&e)))?;

        created
            .id
            .ok_or_else(|| anyhow!("YouTube returned no video id for {}", path.display()))
    }
}

/// Error message carrying the API's own explanation when there is one
fn describe_upload_error(err: &youtube3::Error) -> String {
    match err {
        youtube3::Error::BadRequest(body) => describe_api_error(&body.to_string()),
        other => other.to_string(),
    }
}
