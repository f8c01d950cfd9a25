//! # VideoFile Entity
//!
//! 監視ディレクトリ内で見つかった動画ファイル

use std::path::{Path, PathBuf};

/// 動画ファイル
///
/// 監視ディレクトリ直下の通常ファイルを表す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// ファイルのフルパス
    pub path: PathBuf,
    /// ファイル名（拡張子を含む）
    pub file_name: String,
    /// ファイルサイズ（バイト）
    pub size_bytes: u64,
}

impl VideoFile {
    /// パスとサイズから動画ファイルを作成
    ///
    /// ファイル名がUTF-8として解釈できない場合は `None` を返す
    pub fn from_path(path: impl Into<PathBuf>, size_bytes: u64) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            path,
            file_name,
            size_bytes,
        })
    }

    /// 拡張子が一致するかを大文字小文字を区別せずに判定
    ///
    /// `extension` は先頭の `.` があってもなくてもよい
    pub fn has_extension(&self, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }

    /// アップロード時のタイトル（ファイル名そのまま）
    pub fn title(&self) -> &str {
        &self.file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let video = VideoFile::from_path("/videos/clip.mp4", 1024).unwrap();
        assert_eq!(video.file_name, "clip.mp4");
        assert_eq!(video.path, PathBuf::from("/videos/clip.mp4"));
        assert_eq!(video.size_bytes, 1024);
    }

    #[test]
    fn test_from_path_without_file_name() {
        assert!(VideoFile::from_path("/", 0).is_none());
    }

    #[test]
    fn test_has_extension_case_insensitive() {
        let lower = VideoFile::from_path("videos/a.mp4", 1).unwrap();
        let upper = VideoFile::from_path("videos/b.MP4", 1).unwrap();

        assert!(lower.has_extension("mp4"));
        assert!(upper.has_extension("mp4"));
        assert!(upper.has_extension(".mp4"));
        assert!(!lower.has_extension("mov"));
    }

    #[test]
    fn test_has_extension_no_extension() {
        let video = VideoFile::from_path("videos/mp4", 1).unwrap();
        assert!(!video.has_extension("mp4"));
    }

    #[test]
    fn test_title_keeps_extension() {
        let video = VideoFile::from_path("videos/holiday 2024.mp4", 1).unwrap();
        assert_eq!(video.title(), "holiday 2024.mp4");
    }
}
