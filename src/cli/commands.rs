//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;

/// tfplan-validator - Restrict infrastructure plans to an approved set of actions.
#[derive(Parser, Debug)]
#[command(name = "tfplan-validator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true, env = "TFPLAN_VALIDATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json). Overrides the settings file.
    #[arg(long, global = true)]
    pub output: Option<OutputFormat>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a filter allowing every action the given plans perform.
    #[command(override_usage = "tfplan-validator create PLAN_FILE PLAN_FILE... OUTPUT_FILE")]
    Create {
        /// Plan files followed by the output filter path.
        #[arg(value_name = "PATH", required = true, num_args = 3..)]
        paths: Vec<PathBuf>,
    },

    /// Check that a plan only performs actions allowed by the filters.
    #[command(override_usage = "tfplan-validator check FILTER_FILE... PLAN_FILE")]
    Check {
        /// Filter files followed by the plan to check.
        #[arg(value_name = "PATH", required = true, num_args = 2..)]
        paths: Vec<PathBuf>,

        /// Only accept actions listed verbatim, not compatible ones.
        #[arg(long)]
        strict: bool,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Splits positional paths into leading inputs and the trailing path.
    ///
    /// For `create` this is (plans, output file); for `check` it is
    /// (filters, plan file).
    #[must_use]
    pub fn split_paths(&self) -> Option<(&[PathBuf], &Path)> {
        let paths = match self {
            Self::Create { paths } | Self::Check { paths, .. } => paths,
        };
        paths
            .split_last()
            .map(|(last, rest)| (rest, last.as_path()))
    }
}
