//! Media acquisition: uploads and remote downloads.
//!
//! Obtains a local media file from either an uploaded byte payload or a
//! remote URL. Remote audio is extracted straight to the canonical format by
//! the external downloader.

use super::{MediaFile, MediaFormat, MediaSource};
use crate::error::{Result, TaltError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Obtains a local media file from a [`MediaSource`].
///
/// Each successful call creates exactly one file inside the destination
/// directory.
pub struct MediaAcquirer {
    dest_dir: PathBuf,
    downloader: String,
}

impl MediaAcquirer {
    pub fn new(dest_dir: PathBuf, downloader: impl Into<String>) -> Self {
        Self {
            dest_dir,
            downloader: downloader.into(),
        }
    }

    /// Resolve the source to a file on disk.
    #[instrument(skip(self, source))]
    pub async fn acquire(&self, source: MediaSource) -> Result<MediaFile> {
        match source {
            MediaSource::LocalUpload { data, filename } => self.store_upload(&data, &filename),
            MediaSource::RemoteUrl(url) => self.download(&url).await,
        }
    }

    /// Write an uploaded payload verbatim into the destination directory,
    /// named after the upload's own filename.
    fn store_upload(&self, data: &[u8], filename: &str) -> Result<MediaFile> {
        // Strip any directory components a client may have sent along.
        let name = Path::new(filename.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(TaltError::MissingInput)?;

        std::fs::create_dir_all(&self.dest_dir).map_err(|e| {
            TaltError::UploadWrite(format!(
                "cannot create {}: {e}",
                self.dest_dir.display()
            ))
        })?;

        let path = self.dest_dir.join(name);
        std::fs::write(&path, data)
            .map_err(|e| TaltError::UploadWrite(format!("cannot write {}: {e}", path.display())))?;

        debug!("Stored upload at {}", path.display());
        Ok(MediaFile::from_path(path))
    }

    /// Download and extract the audio track of a remote URL as canonical
    /// audio, under a collision-free generated filename.
    async fn download(&self, url: &str) -> Result<MediaFile> {
        if url.trim().is_empty() {
            return Err(TaltError::MissingInput);
        }

        std::fs::create_dir_all(&self.dest_dir)?;

        let tag = Uuid::new_v4().simple().to_string();
        let output_path = self.dest_dir.join(format!(
            "remote_{}.{}",
            &tag[..8],
            MediaFormat::CANONICAL_EXTENSION
        ));

        info!("Downloading audio from {}", url);

        let result = Command::new(&self.downloader)
            .arg("-x")
            .arg("--audio-format").arg(MediaFormat::CANONICAL_EXTENSION)
            .arg("-o").arg(&output_path)
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaltError::DownloadUnavailable(self.downloader.clone()));
            }
            Err(e) => {
                return Err(TaltError::DownloadFailed(format!(
                    "{} execution failed: {e}",
                    self.downloader
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diag = match (stderr.trim(), stdout.trim()) {
                ("", "") => "downloader exited with an unknown error".to_string(),
                ("", out) => out.to_string(),
                (err, _) => err.to_string(),
            };
            return Err(TaltError::DownloadFailed(diag));
        }

        if !output_path.exists() {
            return Err(TaltError::DownloadFailed(format!(
                "download succeeded but no file was produced at {}",
                output_path.display()
            )));
        }

        debug!("Downloaded audio to {}", output_path.display());
        Ok(MediaFile::from_path(output_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_upload_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("media");
        let acquirer = MediaAcquirer::new(dest.clone(), "yt-dlp");

        let file = acquirer
            .acquire(MediaSource::LocalUpload {
                data: b"RIFF0000".to_vec(),
                filename: "sample.wav".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(file.path, dest.join("sample.wav"));
        assert_eq!(file.format, Some(MediaFormat::Wav));
        assert_eq!(std::fs::read(&file.path).unwrap(), b"RIFF0000");
    }

    #[tokio::test]
    async fn test_store_upload_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = MediaAcquirer::new(dir.path().to_path_buf(), "yt-dlp");

        let file = acquirer
            .acquire(MediaSource::LocalUpload {
                data: vec![1, 2, 3],
                filename: "../evil/clip.mp4".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(file.path, dir.path().join("clip.mp4"));
    }

    #[tokio::test]
    async fn test_store_upload_empty_filename() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = MediaAcquirer::new(dir.path().to_path_buf(), "yt-dlp");

        let result = acquirer
            .acquire(MediaSource::LocalUpload {
                data: vec![],
                filename: "  ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(TaltError::MissingInput)));
    }

    #[tokio::test]
    async fn test_download_unavailable_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("media");
        let acquirer = MediaAcquirer::new(dest.clone(), "talt-no-such-downloader");

        let result = acquirer
            .acquire(MediaSource::RemoteUrl("https://example.com/x".to_string()))
            .await;

        assert!(matches!(result, Err(TaltError::DownloadUnavailable(_))));
        let leftovers: Vec<_> = std::fs::read_dir(&dest).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_download_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = MediaAcquirer::new(dir.path().to_path_buf(), "yt-dlp");

        let result = acquirer
            .acquire(MediaSource::RemoteUrl("".to_string()))
            .await;

        assert!(matches!(result, Err(TaltError::MissingInput)));
    }
}
