//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod fs_video_repository;
pub mod json_state_repository;
pub mod youtube_upload_repository;
