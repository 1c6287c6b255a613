//! Configuration settings for Talt.

use crate::error::{Result, TaltError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub engine: EngineSettings,
    pub tools: ToolSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where uploads, downloads and their siblings land.
    pub download_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            download_dir: "~/.talt/media".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Speech engine settings. `binary` and `model` have no usable defaults and
/// must be configured before any run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Path to the whisper.cpp CLI binary.
    pub binary: String,
    /// Path to the model file.
    pub model: String,
    /// Target language passed to the engine.
    pub language: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: String::new(),
            model: String::new(),
            language: "ko".to_string(),
        }
    }
}

/// External tool executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Media downloader executable.
    pub downloader: String,
    /// Audio transcoder executable.
    pub transcoder: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            transcoder: "ffmpeg".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TaltError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("talt")
            .join("config.toml")
    }

    /// Reject configurations missing the required engine fields. Run at
    /// startup, before any pipeline work begins.
    pub fn validate(&self) -> Result<()> {
        if self.engine.binary.trim().is_empty() {
            return Err(TaltError::Config(
                "engine.binary is required (path to the whisper.cpp CLI)".to_string(),
            ));
        }
        if self.engine.model.trim().is_empty() {
            return Err(TaltError::Config(
                "engine.model is required (path to the model file)".to_string(),
            ));
        }
        Ok(())
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded download directory path.
    pub fn download_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.download_dir)
    }

    /// Get the expanded engine binary path.
    pub fn engine_binary(&self) -> PathBuf {
        Self::expand_path(&self.engine.binary)
    }

    /// Get the expanded model path.
    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.engine.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tools.downloader, "yt-dlp");
        assert_eq!(settings.tools.transcoder, "ffmpeg");
        assert_eq!(settings.engine.language, "ko");
        assert!(settings.engine.binary.is_empty());
    }

    #[test]
    fn test_validate_requires_engine_fields() {
        let mut settings = Settings::default();
        assert!(matches!(settings.validate(), Err(TaltError::Config(_))));

        settings.engine.binary = "/opt/whisper/main".to_string();
        assert!(matches!(settings.validate(), Err(TaltError::Config(_))));

        settings.engine.model = "/opt/whisper/ggml-base.bin".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/talt/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.tools.downloader, "yt-dlp");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.engine.binary = "/opt/whisper/main".to_string();
        settings.engine.model = "/opt/whisper/ggml-base.bin".to_string();
        settings.engine.language = "en".to_string();
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded.engine.binary, "/opt/whisper/main");
        assert_eq!(reloaded.engine.language, "en");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[engine]\nbinary = \"/opt/w/main\"\nmodel = \"/opt/w/model.bin\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.engine.binary, "/opt/w/main");
        assert_eq!(settings.engine.language, "ko");
        assert_eq!(settings.tools.transcoder, "ffmpeg");
    }
}
