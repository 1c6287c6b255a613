//! Transcription pipeline for Talt.
//!
//! Sequences acquisition, normalization and engine invocation, funnels every
//! stage failure into a single result channel, and cleans up the
//! intermediate files a run leaves behind.

use crate::config::Settings;
use crate::error::{Result, TaltError};
use crate::media::{AudioNormalizer, MediaAcquirer, MediaSource};
use crate::transcription::{Transcriber, WhisperCliTranscriber};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The pipeline stage a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquire,
    Normalize,
    Transcribe,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Acquire => write!(f, "acquire"),
            Stage::Normalize => write!(f, "normalize"),
            Stage::Transcribe => write!(f, "transcribe"),
        }
    }
}

/// Result of a single pipeline run. Created fresh per run; a failure names
/// the stage it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { text: String },
    Failed { stage: Stage, message: String },
}

/// The transcription pipeline: acquire, normalize, transcribe.
///
/// Re-entrant across separate calls, but runs sharing a download directory
/// must not overlap: upload filenames derive from user-supplied names and
/// can collide.
pub struct Pipeline {
    acquirer: MediaAcquirer,
    normalizer: AudioNormalizer,
    transcriber: Arc<dyn Transcriber>,
}

impl Pipeline {
    /// Build a pipeline from validated settings. Fails with a configuration
    /// error when the required engine fields are absent.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let transcriber = Arc::new(WhisperCliTranscriber::new(
            settings.engine_binary(),
            settings.model_path(),
            settings.engine.language.clone(),
        ));

        Ok(Self::with_transcriber(settings, transcriber))
    }

    /// Build a pipeline around a custom transcriber.
    pub fn with_transcriber(settings: &Settings, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            acquirer: MediaAcquirer::new(
                settings.download_dir(),
                settings.tools.downloader.clone(),
            ),
            normalizer: AudioNormalizer::new(settings.tools.transcoder.clone()),
            transcriber,
        }
    }

    /// Run the full pipeline on one media source.
    ///
    /// Never returns an error: every stage failure is folded into the
    /// outcome, and intermediate files are removed regardless of how the run
    /// ended.
    #[instrument(skip(self, source))]
    pub async fn run(&self, source: MediaSource, device: &str) -> RunOutcome {
        let mut intermediates: Vec<PathBuf> = Vec::new();

        let outcome = match self.execute(source, device, &mut intermediates).await {
            Ok(text) => RunOutcome::Completed { text },
            Err((stage, err)) => {
                warn!("Stage {} failed: {}", stage, err);
                RunOutcome::Failed {
                    stage,
                    message: err.to_string(),
                }
            }
        };

        self.cleanup(&intermediates);
        outcome
    }

    async fn execute(
        &self,
        source: MediaSource,
        device: &str,
        intermediates: &mut Vec<PathBuf>,
    ) -> std::result::Result<String, (Stage, TaltError)> {
        let from_upload = source.is_upload();

        let acquired = self
            .acquirer
            .acquire(source)
            .await
            .map_err(|e| (Stage::Acquire, e))?;
        // Uploads are the caller's originals and stay put; downloads are
        // pipeline-owned.
        if !from_upload {
            intermediates.push(acquired.path.clone());
        }
        info!("Acquired media at {}", acquired.path.display());

        let normalized = self
            .normalizer
            .normalize(&acquired)
            .await
            .map_err(|e| (Stage::Normalize, e))?;
        if normalized.path != acquired.path {
            intermediates.push(normalized.path.clone());
        }

        let text = self
            .transcriber
            .transcribe(&normalized.path, device)
            .await
            .map_err(|e| (Stage::Transcribe, e))?;
        info!("Transcription finished ({} chars)", text.len());

        Ok(text)
    }

    /// Best-effort removal of intermediate files; failures are logged and
    /// never surfaced over the run's primary result.
    fn cleanup(&self, paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = std::fs::remove_file(path) {
                warn!("Failed to clean up {}: {}", path.display(), e);
            }
        }
    }
}
