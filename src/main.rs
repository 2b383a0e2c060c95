//! tfplan-validator CLI entrypoint.
//!
//! This is the main entrypoint for the tfplan-validator command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tfplan_validator::cli::{Cli, Commands, OutputFormatter};
use tfplan_validator::config::{ConfigParser, LogFormat, Settings};
use tfplan_validator::error::{Result, ValidatorError};
use tfplan_validator::filter::{FilterStore, LocalFilterStore, PlanFilter, load_filters};
use tfplan_validator::plan::PlanReader;
use tfplan_validator::validator::PlanValidator;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    init_logging(cli.verbose, &settings);

    match run(cli, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads settings relative to the current directory.
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let base = std::env::current_dir()
        .map_err(|e| ValidatorError::internal(format!("Cannot determine current directory: {e}")))?;
    ConfigParser::new().with_base_path(base).load(config_path)
}

/// Initializes the logging system.
fn init_logging(verbose: bool, settings: &Settings) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&settings.logging.level)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match settings.logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Dispatches the selected command.
///
/// Returns `Ok(false)` when a check finds violations.
fn run(cli: Cli, settings: &Settings) -> Result<bool> {
    let formatter = OutputFormatter::new(cli.output.unwrap_or(settings.output));
    let store = LocalFilterStore::new();

    let (inputs, last) = cli
        .command
        .split_paths()
        .ok_or_else(|| ValidatorError::internal("missing path arguments"))?;

    match cli.command {
        Commands::Create { .. } => {
            cmd_create(&store, inputs, last, cli.verbose.then_some(&formatter)).map(|()| true)
        }
        Commands::Check { strict, .. } => {
            let allow_compatible = settings.check.allow_compatible && !strict;
            cmd_check(&store, inputs, last, allow_compatible, &formatter)
        }
    }
}

/// Create a filter from plans.
///
/// The filter file is the only output; a summary is rendered on stderr when
/// `summary` is given.
fn cmd_create(
    store: &impl FilterStore,
    plan_paths: &[PathBuf],
    output_path: &Path,
    summary: Option<&OutputFormatter>,
) -> Result<()> {
    info!(
        "Creating filter from {} plans: {}",
        plan_paths.len(),
        output_path.display()
    );

    let plans = PlanReader::new().read_plans(plan_paths)?;
    let filter = PlanFilter::from_plans(&plans)?;
    store.save(output_path, &filter)?;

    if let Some(formatter) = summary {
        eprintln!("{}", formatter.format_filter(&filter).trim_end());
    }
    Ok(())
}

/// Check a plan against filters.
fn cmd_check(
    store: &impl FilterStore,
    filter_paths: &[PathBuf],
    plan_path: &Path,
    allow_compatible: bool,
    formatter: &OutputFormatter,
) -> Result<bool> {
    let filters = load_filters(store, filter_paths)?;
    let plan = PlanReader::new().load_file(plan_path)?;
    debug!("Compatible actions accepted: {allow_compatible}");

    let report = PlanValidator::new(&filters)
        .with_allow_compatible(allow_compatible)
        .validate(&plan)?;

    emit(&formatter.format_report(&report))?;
    Ok(report.is_valid())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Writes command output to stdout.
fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
