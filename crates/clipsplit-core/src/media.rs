//! Media file descriptors and segment naming.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ranges::Range;
use crate::{Error, Result};

/// A media file on disk together with its duration.
///
/// Describes both the source of a split and every segment it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    /// File name with extension (e.g. `episode.mp3`).
    pub filename: String,
    /// Directory containing the file.
    pub folder: PathBuf,
    /// Full path to the file.
    pub path: PathBuf,
    /// Duration in seconds.
    pub duration: f64,
}

impl MediaFile {
    /// Build a descriptor from a path, splitting it into file name and folder.
    ///
    /// A bare file name gets an empty folder, which resolves to the current
    /// directory when joined.
    pub fn from_path(path: impl Into<PathBuf>, duration: f64) -> Result<Self> {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::InvalidPath { path: path.clone() })?;
        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            filename,
            folder,
            path,
            duration,
        })
    }

    /// Descriptor of the `seq`-th (1-based) segment of this file covering
    /// `range`, placed in `output_dir` or next to the source when `None`.
    pub fn segment(&self, seq: usize, range: &Range, output_dir: Option<&Path>) -> MediaFile {
        let folder = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.folder.clone());
        let filename = segment_filename(&self.filename, seq);
        let path = folder.join(&filename);

        MediaFile {
            filename,
            folder,
            path,
            duration: range.duration(),
        }
    }
}

/// Insert a sequence number before the extension: `name.ext` -> `name-<seq>.ext`.
///
/// Only the last dot separates the extension, so `a.b.mp3` becomes
/// `a.b-1.mp3`. Names without an extension (or dot-files such as `.hidden`)
/// get the suffix appended.
pub fn segment_filename(filename: &str, seq: usize) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{seq}.{ext}"),
        _ => format!("{filename}-{seq}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_filename_inserts_index() {
        assert_eq!(segment_filename("talk.mp3", 1), "talk-1.mp3");
        assert_eq!(segment_filename("talk.mp3", 12), "talk-12.mp3");
    }

    #[test]
    fn segment_filename_keeps_inner_dots() {
        assert_eq!(
            segment_filename("Show.S01E02.1080p.mkv", 3),
            "Show.S01E02.1080p-3.mkv"
        );
    }

    #[test]
    fn segment_filename_without_extension() {
        assert_eq!(segment_filename("recording", 2), "recording-2");
        assert_eq!(segment_filename(".hidden", 1), ".hidden-1");
    }

    #[test]
    fn from_path_splits_name_and_folder() {
        let file = MediaFile::from_path("/media/podcasts/episode.mp3", 1000.0).unwrap();
        assert_eq!(file.filename, "episode.mp3");
        assert_eq!(file.folder, PathBuf::from("/media/podcasts"));
        assert_eq!(file.path, PathBuf::from("/media/podcasts/episode.mp3"));
        assert_eq!(file.duration, 1000.0);
    }

    #[test]
    fn from_path_without_file_name_fails() {
        let err = MediaFile::from_path("/", 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn segment_next_to_source() {
        let file = MediaFile::from_path("/media/podcasts/episode.mp3", 1000.0).unwrap();
        let seg = file.segment(2, &Range::new(540.0, 1000.0), None);
        assert_eq!(seg.filename, "episode-2.mp3");
        assert_eq!(seg.folder, PathBuf::from("/media/podcasts"));
        assert_eq!(seg.path, PathBuf::from("/media/podcasts/episode-2.mp3"));
        assert_eq!(seg.duration, 460.0);
    }

    #[test]
    fn segment_in_output_dir() {
        let file = MediaFile::from_path("/media/podcasts/episode.mp3", 1000.0).unwrap();
        let seg = file.segment(1, &Range::new(0.0, 600.0), Some(Path::new("/tmp/clips")));
        assert_eq!(seg.path, PathBuf::from("/tmp/clips/episode-1.mp3"));
        assert_eq!(seg.duration, 600.0);
    }

    #[test]
    fn media_file_serializes() {
        let file = MediaFile::from_path("/media/a.mp3", 12.5).unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["filename"], "a.mp3");
        assert_eq!(json["duration"], 12.5);
    }
}
