//! Error types for the plan validator.
//!
//! This module provides the error hierarchy for every stage of a validation
//! run: settings, plan ingestion, and filter storage.

use std::path::PathBuf;
use thiserror::Error;

use crate::plan::Action;

/// The main error type for the plan validator.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Settings-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan ingestion errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Filter storage errors.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Settings-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The settings file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// A setting has a value outside its domain.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Name of the setting.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised while reading plans or merging them into a filter.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A resource change carries a verb sequence outside the known forms.
    #[error("unrecognized action in plan: [{}]", .actions.join(" "))]
    UnrecognizedAction {
        /// The raw verbs as they appeared in the plan.
        actions: Vec<String>,
    },

    /// The same address appears twice in one plan document.
    #[error("duplicate address in plan: {address} [{action}]")]
    DuplicateAddress {
        /// The repeated address.
        address: String,
        /// Action recorded for the first occurrence.
        action: Action,
    },

    /// A plan file could not be read.
    #[error("failed to read plan {path}: {source}")]
    ReadFailure {
        /// Path of the plan file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A plan file is not a valid plan document.
    #[error("failed to decode plan {path}: {source}")]
    DecodeFailure {
        /// Path of the plan file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Filter storage errors.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A filter file could not be opened or read.
    #[error("failed to read filter {path}: {source}")]
    ReadFailure {
        /// Path of the filter file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A filter file does not hold a valid filter document.
    #[error("failed to decode filter {path}: {source}")]
    DecodeFailure {
        /// Path of the filter file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A filter could not be written.
    #[error("failed to write filter {path}: {source}")]
    WriteFailure {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A filter could not be serialized.
    #[error("failed to encode filter: {source}")]
    EncodeFailure {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;

impl ValidatorError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl PlanError {
    /// Creates an unrecognized-action error from raw plan verbs.
    #[must_use]
    pub fn unrecognized<S: AsRef<str>>(actions: &[S]) -> Self {
        Self::UnrecognizedAction {
            actions: actions.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }
}
