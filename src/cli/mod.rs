//! CLI module for the plan validator.
//!
//! This module provides the command-line interface for creating filters
//! from plans and checking plans against filters.

mod commands;
mod output;

pub use crate::config::OutputFormat;
pub use commands::{Cli, Commands};
pub use output::OutputFormatter;
