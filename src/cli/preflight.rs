//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available before
//! starting a run that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, TaltError};
use std::process::Command;

/// Run pre-flight checks for a transcription run.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
/// Anything caught here is startup-fatal; errors inside a run are handled by
/// the pipeline itself.
pub fn check(settings: &Settings) -> Result<()> {
    settings.validate()?;

    check_tool(&settings.tools.downloader)?;
    check_tool(&settings.tools.transcoder)?;

    let binary = settings.engine_binary();
    if !binary.exists() {
        return Err(TaltError::Config(format!(
            "engine binary not found at {}",
            binary.display()
        )));
    }

    let model = settings.model_path();
    if !model.exists() {
        return Err(TaltError::Config(format!(
            "model file not found at {}",
            model.display()
        )));
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TaltError::Config(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TaltError::Config(format!(
            "{} not found. Please install it and ensure it's in your PATH.",
            name
        ))),
        Err(e) => Err(TaltError::Config(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fails_on_unconfigured_engine() {
        let settings = Settings::default();
        assert!(matches!(check(&settings), Err(TaltError::Config(_))));
    }

    #[test]
    fn test_check_tool_missing() {
        assert!(matches!(
            check_tool("talt-no-such-tool"),
            Err(TaltError::Config(_))
        ));
    }
}
