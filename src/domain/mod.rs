//! # Domain Layer
//!
//! このモジュールはアップロード対象の動画とその選択ルールを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - ファイルシステムやYouTube APIについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（VideoFile, VideoMetadataなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（選択ルール）

pub mod entities;
pub mod repositories;
pub mod services;
