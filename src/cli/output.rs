//! Output formatting for CLI commands.
//!
//! This module renders created filters and check reports either as
//! human-readable text or as JSON for scripting.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::OutputFormat;
use crate::filter::PlanFilter;
use crate::plan::Action;
use crate::validator::ValidationReport;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Filter entry row for table display.
#[derive(Tabled)]
struct FilterRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Allowed actions")]
    actions: String,
}

/// Violation row for table display.
#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Allowed")]
    allowed: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a freshly created filter.
    #[must_use]
    pub fn format_filter(&self, filter: &PlanFilter) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(filter).unwrap_or_default(),
            OutputFormat::Text => Self::format_filter_text(filter),
        }
    }

    /// Formats a filter as text.
    fn format_filter_text(filter: &PlanFilter) -> String {
        if filter.is_empty() {
            return format!(
                "{} Filter allows no changes (no resources are created, updated or deleted).\n",
                "✓".green()
            );
        }

        let rows: Vec<FilterRow> = filter
            .allowed_actions
            .iter()
            .map(|(address, actions)| FilterRow {
                address: address.to_string(),
                actions: actions
                    .iter()
                    .map(|a| Self::format_action(*a))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        let mut output = String::new();
        let _ = writeln!(output, "\nFilter (format version {})\n", filter.format_version);
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');
        let _ = writeln!(output, "\n{} addresses allowed to change.", filter.len());
        output
    }

    /// Formats a check report.
    #[must_use]
    pub fn format_report(&self, report: &ValidationReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&ReportJson::from(report))
                .unwrap_or_default(),
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    /// Formats a check report as text.
    fn format_report_text(report: &ValidationReport) -> String {
        if report.is_valid() {
            return format!(
                "{} Plan is permitted ({} changes checked).\n",
                "✓".green(),
                report.checked
            );
        }

        let rows: Vec<ViolationRow> = report
            .violations
            .iter()
            .map(|v| ViolationRow {
                address: v.address.clone(),
                planned: Self::format_action(v.action),
                allowed: if v.allowed.is_empty() {
                    "-".dimmed().to_string()
                } else {
                    v.allowed
                        .iter()
                        .map(|a| Self::format_action(*a))
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            })
            .collect();

        let mut output = format!("{} Plan is not permitted\n\n", "✗".red());
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        output.push('\n');
        for violation in &report.violations {
            let _ = writeln!(output, "   - {violation}");
        }

        let _ = write!(
            output,
            "\n{} of {} changes rejected.\n",
            report.violations.len().to_string().red(),
            report.checked
        );
        output
    }

    /// Formats an action with color.
    fn format_action(action: Action) -> String {
        match action {
            Action::Create => "+create".green().to_string(),
            Action::Update => "~update".yellow().to_string(),
            Action::Delete => "-delete".red().to_string(),
            Action::DeleteCreate => "-/+delete-create".red().to_string(),
            Action::CreateDelete => "+/-create-delete".yellow().to_string(),
            Action::NoOp | Action::Read | Action::Invalid => action.as_str().dimmed().to_string(),
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ReportJson<'a> {
    valid: bool,
    checked: usize,
    violations: Vec<ViolationJson<'a>>,
}

#[derive(serde::Serialize)]
struct ViolationJson<'a> {
    address: &'a str,
    action: Action,
    allowed: &'a [Action],
    message: String,
}

impl<'a> From<&'a ValidationReport> for ReportJson<'a> {
    fn from(report: &'a ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            checked: report.checked,
            violations: report
                .violations
                .iter()
                .map(|v| ViolationJson {
                    address: &v.address,
                    action: v.action,
                    allowed: &v.allowed,
                    message: v.to_string(),
                })
                .collect(),
        }
    }
}
