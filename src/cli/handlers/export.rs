//! Export command handler.

use anyhow::{Context, Result};
use tracing::info;

use super::{ConsoleReporter, headline};
use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::print_report;
use crate::export::{BasicHtmlConverter, ExportOptions, PngExtensions, export_library};
use crate::infra::{FsOutput, FsStorage, load_library};

pub fn handle_export(args: &ExportArgs, config: &Config, verbose: bool) -> Result<()> {
    let storage = FsStorage;
    let library = load_library(&storage, &args.library)
        .with_context(|| format!("failed to load library {}", args.library.display()))?;

    let options = ExportOptions {
        output_root: config.output_dir(args.output.as_ref(), &args.library),
        png_extensions: PngExtensions::new(config.png_extensions(&args.png_extensions)),
        resource_layout: config.resource_layout(args.resource_layout),
        exclude: config.exclude(&args.exclude),
    };
    info!("exporting to {}", options.output_root.display());

    let mut reporter = ConsoleReporter::new(verbose);
    let report = export_library(
        &library,
        &storage,
        &FsOutput,
        &BasicHtmlConverter,
        &options,
        &mut reporter,
    )
    .with_context(|| format!("export to {} failed", options.output_root.display()))?;

    print_report(args.format, &report, &headline("Exported", &report))
}
