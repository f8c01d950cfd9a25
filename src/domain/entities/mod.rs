//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **VideoFile**: 監視ディレクトリ内の動画ファイル
//! - **VideoMetadata**: アップロード時に送信するタイトル・公開設定など

pub mod video_file;
pub mod video_metadata;
