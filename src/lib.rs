//! # Reelsync
//!
//! フォルダ内の動画を一定間隔で1本ずつ YouTube にアップロードし、
//! 成功したファイルをアップロード済みフォルダへ移動するワーカー
//!
//! 以下の4層で構成されています：
//!
//! - **Domain層**: 動画ファイル・メタデータ・選択ルール（外部依存なし）
//! - **Application層**: アップロードのユースケース
//! - **Adapter層**: 外部システムとの統合（YouTube Data API, ファイルシステム, 認証）
//! - **Driver層**: CLI、ワーカーループ、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
