//! Adapter Layer
//!
//! 外部システム（YouTube Data API, ファイルシステム）との統合

pub mod auth;
pub mod config;
pub mod repositories;
pub mod youtube;
