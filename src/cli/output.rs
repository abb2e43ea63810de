//! Output format types and report printing.

use clap::ValueEnum;
use serde::Serialize;

use crate::export::ExportReport;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Renders the human-readable summary of an export or check run.
pub fn format_report(report: &ExportReport, headline: &str) -> String {
    let mut lines = vec![headline.to_string()];

    if !report.hierarchy_warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{} hierarchy warning(s):",
            report.hierarchy_warnings.len()
        ));
        for warning in &report.hierarchy_warnings {
            lines.push(format!("  {warning}"));
        }
    }

    if report.timestamp_failures > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Could not set file times on {} note(s)",
            report.timestamp_failures
        ));
    }

    if !report.broken_links.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{} broken link(s):",
            report.broken_links.len()
        ));
        for group in report.broken_links.by_source() {
            lines.push(format!(
                "  {} ({})",
                group.source_note_title, group.source_note_id
            ));
            for target in group.targets {
                lines.push(format!("    -> {target}"));
            }
        }
    }

    lines.join("\n")
}

/// Prints a report in the requested format.
pub fn print_report(
    format: OutputFormat,
    report: &ExportReport,
    headline: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => println!("{}", format_report(report, headline)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(report))?);
        }
    }
    Ok(())
}
