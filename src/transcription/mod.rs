//! Transcription module for Talt.
//!
//! Drives an external whisper.cpp-style CLI against normalized audio and
//! extracts its plain-text output.

mod engine;

pub use engine::{transcript_path, WhisperCliTranscriber};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription engines.
///
/// `device` selects the accelerator the engine should run on; it is scoped
/// to the invocation, never to the hosting process.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a canonical-format audio file and return the plain text.
    async fn transcribe(&self, audio_path: &Path, device: &str) -> Result<String>;
}
