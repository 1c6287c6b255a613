//! Talt - Media Transcription
//!
//! A local-first CLI tool for transcribing audio and video media through an
//! external whisper.cpp-style speech-to-text engine.
//!
//! The name "Talt" comes from the Norwegian word for "spoken."
//!
//! # Overview
//!
//! Talt takes a local media file or a remote media URL, normalizes it to the
//! canonical audio format the engine requires, runs the engine, and returns
//! the plain transcript text.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `media` - Media sources, acquisition and audio normalization
//! - `transcription` - Speech engine invocation
//! - `pipeline` - Pipeline coordination and cleanup
//!
//! # Example
//!
//! ```rust,no_run
//! use talt::config::Settings;
//! use talt::media::MediaSource;
//! use talt::pipeline::{Pipeline, RunOutcome};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let source = MediaSource::RemoteUrl("https://youtu.be/dQw4w9WgXcQ".into());
//!     match pipeline.run(source, "0").await {
//!         RunOutcome::Completed { text } => println!("{text}"),
//!         RunOutcome::Failed { stage, message } => eprintln!("{stage}: {message}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod transcription;

pub use error::{Result, TaltError};
