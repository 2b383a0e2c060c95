//! Local file-based filter storage backend.
//!
//! Filters are stored as pretty-printed JSON documents. Writes go through a
//! temporary file and a rename so a reader never sees a half-written filter.

use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{FilterError, Result};

use super::store::FilterStore;
use super::types::{CURRENT_FORMAT_VERSION, PlanFilter};

/// Local file-based filter store.
#[derive(Debug, Default)]
pub struct LocalFilterStore;

impl LocalFilterStore {
    /// Creates a new local filter store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Encodes a filter as it is written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be serialized.
    pub fn encode(filter: &PlanFilter) -> Result<String> {
        let mut content = serde_json::to_string_pretty(filter)
            .map_err(|source| FilterError::EncodeFailure { source })?;
        content.push('\n');
        Ok(content)
    }
}

impl FilterStore for LocalFilterStore {
    fn load(&self, path: &Path) -> Result<PlanFilter> {
        info!("Loading filter from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| FilterError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;

        let filter: PlanFilter =
            serde_json::from_str(&content).map_err(|source| FilterError::DecodeFailure {
                path: path.to_path_buf(),
                source,
            })?;

        if !filter.is_current() {
            warn!(
                "Filter {} has format version {}, expected {}",
                path.display(),
                filter.format_version,
                CURRENT_FORMAT_VERSION
            );
        }

        debug!("Loaded filter with {} addresses", filter.len());
        Ok(filter)
    }

    fn save(&self, path: &Path, filter: &PlanFilter) -> Result<()> {
        info!("Saving filter to: {}", path.display());

        let content = Self::encode(filter)?;
        let write_failure = |source| FilterError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!("Creating filter directory: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(write_failure)?;
            }
        }

        // Write to a temporary file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");

        let mut file = std::fs::File::create(&temp_path).map_err(write_failure)?;
        file.write_all(content.as_bytes()).map_err(write_failure)?;
        file.sync_all().map_err(write_failure)?;
        drop(file);

        std::fs::rename(&temp_path, path).map_err(write_failure)?;

        debug!("Filter saved successfully");
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "local"
    }
}
