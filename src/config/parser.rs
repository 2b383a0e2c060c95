//! Settings parser for loading and merging configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional YAML file, and `TFPLAN_VALIDATOR_*` environment variables
//! (which may themselves come from a `.env` file).

use crate::error::{ConfigError, Result, ValidatorError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::settings::{LOG_LEVELS, Settings};

/// Environment variable overriding `check.allow_compatible`.
pub const ENV_ALLOW_COMPATIBLE: &str = "TFPLAN_VALIDATOR_ALLOW_COMPATIBLE";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TFPLAN_VALIDATOR_LOG_LEVEL";

/// Environment variable overriding `logging.format`.
pub const ENV_LOG_FORMAT: &str = "TFPLAN_VALIDATOR_LOG_FORMAT";

/// Environment variable overriding `output`.
pub const ENV_OUTPUT: &str = "TFPLAN_VALIDATOR_OUTPUT";

/// Default settings file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    ".tfplan-validator.yaml",
    ".tfplan-validator.yml",
    "tfplan-validator.yaml",
];

/// Parser for loading validator settings.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new settings parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        info!("Loading settings from: {}", path.display());

        if !path.exists() {
            return Err(ValidatorError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidatorError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses settings from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<Settings> {
        debug!("Parsing YAML settings");

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            ValidatorError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        Ok(settings)
    }

    /// Resolves and loads the full settings stack.
    ///
    /// An explicit `path` must exist. Without one, the default file names are
    /// searched from the base path upwards and defaults are used if none is
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if a file or override cannot be parsed, or if the
    /// resulting settings are invalid.
    pub fn load(&self, path: Option<&Path>) -> Result<Settings> {
        self.load_dotenv()?;

        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(self.base_dir()),
        };

        let mut settings = match file {
            Some(file) => self.load_file(file)?,
            None => {
                debug!("No settings file found, using defaults");
                Settings::default()
            }
        };

        apply_overrides(&mut settings, |name| std::env::var(name).ok())?;
        validate(&settings)?;
        Ok(settings)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self.base_dir().join(".env");

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                ValidatorError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    fn base_dir(&self) -> PathBuf {
        self.base_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Applies environment overrides using `lookup` to read variables.
///
/// # Errors
///
/// Returns an error if an override has a value outside its domain.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_ALLOW_COMPATIBLE) {
        debug!("Overriding check.allow_compatible from environment");
        settings.check.allow_compatible = parse_bool(&value)
            .ok_or_else(|| invalid_value(ENV_ALLOW_COMPATIBLE, &value))?;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        debug!("Overriding logging.level from environment");
        settings.logging.level = level;
    }

    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        debug!("Overriding logging.format from environment");
        settings.logging.format = format
            .parse()
            .map_err(|value: String| invalid_value(ENV_LOG_FORMAT, &value))?;
    }

    if let Some(output) = lookup(ENV_OUTPUT) {
        debug!("Overriding output from environment");
        settings.output = output
            .parse()
            .map_err(|value: String| invalid_value(ENV_OUTPUT, &value))?;
    }

    Ok(())
}

/// Checks that settings values are within their domains.
///
/// # Errors
///
/// Returns an error naming the first invalid setting.
pub fn validate(settings: &Settings) -> Result<()> {
    let level = settings.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(invalid_value("logging.level", &settings.logging.level));
    }
    Ok(())
}

/// Finds a settings file in `start_dir` or its parent directories.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found settings file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_value(name: &str, value: &str) -> ValidatorError {
    ValidatorError::Config(ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}
