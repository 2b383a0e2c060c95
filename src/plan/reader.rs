//! Plan file loading.
//!
//! Plans are read strictly and in order: the first file that cannot be read
//! or decoded aborts the whole batch.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{PlanError, Result};

use super::types::Plan;

/// Reader for plan documents on disk.
#[derive(Debug, Default)]
pub struct PlanReader;

impl PlanReader {
    /// Creates a new plan reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a plan document.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Plan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| PlanError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_json(&content, path)
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a plan document.
    pub fn parse_json(&self, content: &str, source: &Path) -> Result<Plan> {
        let plan: Plan = serde_json::from_str(content).map_err(|e| PlanError::DecodeFailure {
            path: source.to_path_buf(),
            source: e,
        })?;

        debug!(
            "Parsed plan {} with {} resource changes",
            source.display(),
            plan.resource_changes.len()
        );
        Ok(plan)
    }

    /// Loads several plans, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first read or decode failure; later paths are not read.
    pub fn read_plans<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Plan>> {
        paths.iter().map(|path| self.load_file(path)).collect()
    }
}
