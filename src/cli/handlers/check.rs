//! Check command handler.

use anyhow::{Context, Result};

use super::{ConsoleReporter, headline};
use crate::cli::CheckArgs;
use crate::cli::config::Config;
use crate::cli::output::print_report;
use crate::export::{BasicHtmlConverter, ExportOptions, PngExtensions, execute};
use crate::infra::{DryRunOutput, FsStorage, load_library};

/// Runs the whole export pipeline against a sink that writes nothing.
pub fn handle_check(args: &CheckArgs, config: &Config, verbose: bool) -> Result<()> {
    let storage = FsStorage;
    let library = load_library(&storage, &args.library)
        .with_context(|| format!("failed to load library {}", args.library.display()))?;

    let options = ExportOptions {
        output_root: config.output_dir(None, &args.library),
        png_extensions: PngExtensions::new(config.png_extensions(&args.png_extensions)),
        resource_layout: config.resource_layout(None),
        exclude: config.exclude(&args.exclude),
    };

    let mut reporter = ConsoleReporter::new(verbose);
    let report = execute(
        &library,
        &storage,
        &DryRunOutput,
        &BasicHtmlConverter,
        &options,
        &mut reporter,
    )
    .context("check failed")?;

    print_report(args.format, &report, &headline("Checked", &report))
}
