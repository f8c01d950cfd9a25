//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverVideosUseCase**: アップロード候補の発見
//! - **UploadVideoUseCase**: 動画1本のアップロードと移動

pub mod discover_videos;
pub mod upload_video;
