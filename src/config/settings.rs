//! Settings types for the validator.
//!
//! This module defines the structs that map to the optional
//! `.tfplan-validator.yaml` file. Every field has a default, so an empty or
//! missing file yields a usable configuration.

use serde::{Deserialize, Serialize};

/// The root settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Plan check behaviour.
    pub check: CheckSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Report format.
    pub output: OutputFormat,
}

/// Plan check behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckSettings {
    /// Accept an action when the filter only lists a compatible one.
    pub allow_compatible: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Log line format.
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Report format options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Level names accepted by the logging setting.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            allow_compatible: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            format: LogFormat::Text,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(s.to_string()),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(s.to_string()),
        }
    }
}
