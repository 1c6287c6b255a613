//! whisper.cpp CLI engine invocation.

use super::Transcriber;
use crate::error::{Result, TaltError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Environment variable the engine reads to pick its accelerator device.
const DEVICE_ENV: &str = "CUDA_VISIBLE_DEVICES";

/// Sibling path where the engine writes its plain-text output: the audio
/// path with `.txt` appended to the full filename (`clip.wav` ->
/// `clip.wav.txt`).
pub fn transcript_path(audio_path: &Path) -> PathBuf {
    let mut name = audio_path.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}

/// Transcriber backed by the whisper.cpp command-line binary.
pub struct WhisperCliTranscriber {
    binary: PathBuf,
    model: PathBuf,
    language: String,
}

impl WhisperCliTranscriber {
    pub fn new(binary: PathBuf, model: PathBuf, language: impl Into<String>) -> Self {
        Self {
            binary,
            model,
            language: language.into(),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    #[instrument(skip(self), fields(audio = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path, device: &str) -> Result<String> {
        debug!("Invoking {} on device {}", self.binary.display(), device);

        let result = Command::new(&self.binary)
            .arg("-m").arg(&self.model)
            .arg("-f").arg(audio_path)
            .arg("-l").arg(&self.language)
            .arg("-otxt")
            .env(DEVICE_ENV, device)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaltError::InvocationFailed(format!(
                    "{} not found",
                    self.binary.display()
                )));
            }
            Err(e) => {
                return Err(TaltError::InvocationFailed(format!(
                    "{} execution failed: {e}",
                    self.binary.display()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diag = match (stderr.trim(), stdout.trim()) {
                ("", "") => "engine exited with an unknown error".to_string(),
                ("", out) => out.to_string(),
                (err, _) => err.to_string(),
            };
            return Err(TaltError::InvocationFailed(diag));
        }

        let txt_path = transcript_path(audio_path);
        if !txt_path.exists() {
            return Err(TaltError::ResultMissing(txt_path.display().to_string()));
        }

        // The .txt file stays behind for inspection; only its contents are
        // the pipeline's result.
        let text = tokio::fs::read_to_string(&txt_path).await?;
        Ok(text.trim().to_string())
    }
}
