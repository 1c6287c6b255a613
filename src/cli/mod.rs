//! CLI module for Talt.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Talt - Media Transcription
///
/// A local-first CLI tool for transcribing audio and video media through an
/// external speech-to-text engine. The name "Talt" comes from the Norwegian
/// word for "spoken."
#[derive(Parser, Debug)]
#[command(name = "talt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe a local media file or a remote media URL
    Transcribe {
        /// Local audio/video file path, or an http(s) media URL
        input: String,

        /// Accelerator device selector passed to the engine
        #[arg(short, long, default_value = "0")]
        device: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
