//! Configuration module for the plan validator.
//!
//! This module handles all settings-related functionality:
//! - Deserializing the optional `.tfplan-validator.yaml` file
//! - `.env` loading and `TFPLAN_VALIDATOR_*` environment overrides
//! - Validation of settings values

mod parser;
mod settings;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_ALLOW_COMPATIBLE, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_OUTPUT, apply_overrides, find_config_file, validate,
};
pub use settings::{CheckSettings, LOG_LEVELS, LogFormat, LoggingSettings, OutputFormat, Settings};
