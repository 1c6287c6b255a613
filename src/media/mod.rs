//! Media source and file abstractions for Talt.
//!
//! A [`MediaSource`] describes where media comes from (an uploaded byte
//! payload or a remote URL); a [`MediaFile`] is a file on disk with its
//! extension-derived format.

mod acquire;
mod normalize;

pub use acquire::MediaAcquirer;
pub use normalize::AudioNormalizer;

use crate::error::{Result, TaltError};
use std::path::{Path, PathBuf};
use url::Url;

/// Input formats accepted by the pipeline.
///
/// The whitelist is the canonical audio format plus the common containers the
/// transcoder knows how to strip down to audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Wav,
    Mp3,
    Mp4,
    M4a,
}

impl MediaFormat {
    /// Extension of the canonical audio format required by the engine.
    pub const CANONICAL_EXTENSION: &'static str = "wav";

    /// Derive the format from a path's extension. `None` for anything
    /// outside the whitelist.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "wav" => Some(MediaFormat::Wav),
            "mp3" => Some(MediaFormat::Mp3),
            "mp4" => Some(MediaFormat::Mp4),
            "m4a" => Some(MediaFormat::M4a),
            _ => None,
        }
    }

    /// Whether this format is what the engine consumes directly.
    pub fn is_canonical(self) -> bool {
        matches!(self, MediaFormat::Wav)
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaFormat::Wav => write!(f, "wav"),
            MediaFormat::Mp3 => write!(f, "mp3"),
            MediaFormat::Mp4 => write!(f, "mp4"),
            MediaFormat::M4a => write!(f, "m4a"),
        }
    }
}

/// Where the media comes from. Immutable once constructed; consumed by
/// [`MediaAcquirer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// An in-memory payload with its original filename.
    LocalUpload { data: Vec<u8>, filename: String },
    /// A remote media URL handed to the external downloader.
    RemoteUrl(String),
}

impl MediaSource {
    /// Classify a CLI input string: http(s) URLs become [`RemoteUrl`];
    /// anything else is read from disk as an upload payload.
    ///
    /// [`RemoteUrl`]: MediaSource::RemoteUrl
    pub fn from_input(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TaltError::MissingInput);
        }

        if let Ok(url) = Url::parse(trimmed) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(MediaSource::RemoteUrl(trimmed.to_string()));
            }
        }

        let path = Path::new(trimmed);
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(TaltError::MissingInput)?
            .to_string();
        let data = std::fs::read(path)?;

        Ok(MediaSource::LocalUpload { data, filename })
    }

    /// Whether acquisition of this source keeps the caller's original bytes
    /// (uploads) rather than producing a pipeline-owned artifact (downloads).
    pub fn is_upload(&self) -> bool {
        matches!(self, MediaSource::LocalUpload { .. })
    }
}

/// A media file on disk with its inferred format.
///
/// `format` is `None` when the extension falls outside the whitelist; the
/// normalizer rejects such files before spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub format: Option<MediaFormat>,
}

impl MediaFile {
    pub fn from_path(path: PathBuf) -> Self {
        let format = MediaFormat::from_path(&path);
        Self { path, format }
    }

    /// The raw extension, for error messages.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(MediaFormat::from_path(Path::new("a.wav")), Some(MediaFormat::Wav));
        assert_eq!(MediaFormat::from_path(Path::new("a.WAV")), Some(MediaFormat::Wav));
        assert_eq!(MediaFormat::from_path(Path::new("/x/y/a.mp3")), Some(MediaFormat::Mp3));
        assert_eq!(MediaFormat::from_path(Path::new("clip.mp4")), Some(MediaFormat::Mp4));
        assert_eq!(MediaFormat::from_path(Path::new("a.m4a")), Some(MediaFormat::M4a));
        assert_eq!(MediaFormat::from_path(Path::new("a.flac")), None);
        assert_eq!(MediaFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_canonical() {
        assert!(MediaFormat::Wav.is_canonical());
        assert!(!MediaFormat::Mp3.is_canonical());
    }

    #[test]
    fn test_from_input_url() {
        let source = MediaSource::from_input("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(
            source,
            MediaSource::RemoteUrl("https://youtu.be/dQw4w9WgXcQ".to_string())
        );
        assert!(!source.is_upload());
    }

    #[test]
    fn test_from_input_empty() {
        assert!(matches!(
            MediaSource::from_input("   "),
            Err(TaltError::MissingInput)
        ));
    }

    #[test]
    fn test_from_input_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let source = MediaSource::from_input(path.to_str().unwrap()).unwrap();
        match source {
            MediaSource::LocalUpload { data, filename } => {
                assert_eq!(data, b"RIFF");
                assert_eq!(filename, "sample.wav");
            }
            _ => panic!("expected LocalUpload"),
        }
    }

    #[test]
    fn test_media_file_format_inference() {
        let file = MediaFile::from_path(PathBuf::from("/tmp/clip.mp4"));
        assert_eq!(file.format, Some(MediaFormat::Mp4));

        let unknown = MediaFile::from_path(PathBuf::from("/tmp/clip.mov"));
        assert_eq!(unknown.format, None);
        assert_eq!(unknown.extension(), "mov");
    }
}
