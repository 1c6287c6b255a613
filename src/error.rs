//! Error types for Talt.

use thiserror::Error;

/// Library-level error type for Talt operations.
#[derive(Error, Debug)]
pub enum TaltError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No media file or URL supplied")]
    MissingInput,

    #[error("Unsupported media format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to store upload: {0}")]
    UploadWrite(String),

    #[error("Downloader not found: {0}. Please install it and ensure it's in your PATH.")]
    DownloadUnavailable(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Transcoder not found: {0}. Please install it and ensure it's in your PATH.")]
    TranscoderUnavailable(String),

    #[error("Transcoding failed: {0}")]
    TranscodeFailed(String),

    #[error("Transcription engine failed: {0}")]
    InvocationFailed(String),

    #[error("Transcript file missing: {0}")]
    ResultMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Talt operations.
pub type Result<T> = std::result::Result<T, TaltError>;
