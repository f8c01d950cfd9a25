//! YouTube Adapter Modules
//!
//! YouTube Data API統合のためのアダプターモジュール

pub mod client;
pub mod models;
pub mod progress;
