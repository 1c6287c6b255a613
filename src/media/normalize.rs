//! Audio normalization via the external transcoder.
//!
//! Ensures a media file is in the canonical audio format the engine
//! consumes, converting only when necessary.

use super::{MediaFile, MediaFormat};
use crate::error::{Result, TaltError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Converts whitelisted media files to the canonical audio format.
pub struct AudioNormalizer {
    transcoder: String,
}

impl AudioNormalizer {
    pub fn new(transcoder: impl Into<String>) -> Self {
        Self {
            transcoder: transcoder.into(),
        }
    }

    /// Sibling output path for a transcode: same base name, canonical
    /// extension, same directory.
    pub fn output_path(input: &Path) -> PathBuf {
        input.with_extension(MediaFormat::CANONICAL_EXTENSION)
    }

    /// Return the file in canonical format.
    ///
    /// Already-canonical input is returned unchanged without spawning
    /// anything; other whitelisted formats are transcoded to a sibling file,
    /// leaving the original in place.
    #[instrument(skip(self, input), fields(path = %input.path.display()))]
    pub async fn normalize(&self, input: &MediaFile) -> Result<MediaFile> {
        let format = input
            .format
            .ok_or_else(|| TaltError::UnsupportedFormat(input.extension()))?;

        if format.is_canonical() {
            debug!("Already canonical, skipping transcode");
            return Ok(input.clone());
        }

        let output_path = Self::output_path(&input.path);
        debug!("Transcoding {} -> {}", input.path.display(), output_path.display());

        let result = Command::new(&self.transcoder)
            .arg("-y")
            .arg("-i").arg(&input.path)
            .arg("-vn")
            .arg(&output_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaltError::TranscoderUnavailable(self.transcoder.clone()));
            }
            Err(e) => {
                return Err(TaltError::TranscodeFailed(format!(
                    "{} execution failed: {e}",
                    self.transcoder
                )));
            }
        };

        if !output.status.success() || !output_path.exists() {
            // Remove any partial output before surfacing the failure.
            let _ = std::fs::remove_file(&output_path);

            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diag = match (stderr.trim(), stdout.trim()) {
                ("", "") => "transcoder exited with an unknown error".to_string(),
                ("", out) => out.to_string(),
                (err, _) => err.to_string(),
            };
            return Err(TaltError::TranscodeFailed(diag));
        }

        Ok(MediaFile::from_path(output_path))
    }
}
