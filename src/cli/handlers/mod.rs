//! Command handlers for the CLI.

mod check;
mod export;

use std::path::Path;

use crate::export::{ExportReport, ProgressReporter};

pub use check::handle_check;
pub use export::handle_export;

// ===========================================
// Shared Utilities
// ===========================================

/// Progress reporter that prints to stderr.
///
/// Completion is reported at most once, however many times the executor
/// signals it.
pub(crate) struct ConsoleReporter {
    verbose: bool,
    finished: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(verbose: bool) -> Self {
        Self {
            verbose,
            finished: false,
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_note(&mut self, path: &Path) {
        if self.verbose {
            eprintln!("  wrote: {}", path.display());
        }
    }

    fn on_complete(&mut self, report: &ExportReport) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.verbose {
            eprintln!(
                "Finished: {} notes, {} resources",
                report.notes, report.resources
            );
        }
    }
}

/// One-line summary shown before the details of a report.
pub(crate) fn headline(verb: &str, report: &ExportReport) -> String {
    format!(
        "{verb} {} notes in {} notebooks ({} resources)",
        report.notes, report.notebooks, report.resources
    )
}
