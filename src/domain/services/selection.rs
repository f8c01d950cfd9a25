//! # Selection Service
//!
//! 次にアップロードする動画の選択ルール

use crate::domain::entities::video_file::VideoFile;

/// 選択サービス
///
/// 拡張子で候補を絞り込み、ファイル名の辞書順で並べる
pub struct SelectionService;

impl SelectionService {
    /// 拡張子が一致するファイルをファイル名順に並べて返す
    ///
    /// # Arguments
    ///
    /// * `videos` - 監視ディレクトリ内の全ファイル
    /// * `extension` - 対象とする拡張子（大文字小文字は区別しない）
    pub fn candidates(videos: Vec<VideoFile>, extension: &str) -> Vec<VideoFile> {
        let mut candidates: Vec<VideoFile> = videos
            .into_iter()
            .filter(|video| video.has_extension(extension))
            .collect();
        candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        candidates
    }
}
