//! Configuration module for Talt.

mod settings;

pub use settings::{EngineSettings, GeneralSettings, Settings, ToolSettings};
