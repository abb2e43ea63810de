//! Runs a planned export: directories, resources, note files, timestamps.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::ExportError;
use super::hierarchy::{HierarchyWarning, collect_walk};
use super::html::HtmlConverter;
use super::plan::{ExportPlan, PlanOptions, PlannedExport, PlannedNote, plan};
use super::render::render_body;
use super::resource_name::PngExtensions;
use super::resources::{ResourceLayout, ResourceLocation, ResourceMap};
use super::rewrite::ContentRewriter;
use crate::domain::{BrokenLinks, Library};
use crate::infra::{OutputSink, Storage, dir_has_entries, load_content, serialize};

/// Settings for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub output_root: PathBuf,
    pub png_extensions: PngExtensions,
    pub resource_layout: ResourceLayout,
    /// Notebook display names that are never exported.
    pub exclude: Vec<String>,
}

/// Aggregate outcome of an export run.
#[derive(Debug, Default, Serialize)]
pub struct ExportReport {
    pub notebooks: usize,
    pub notes: usize,
    pub resources: usize,
    /// Notes whose file times could not be set.
    pub timestamp_failures: usize,
    pub hierarchy_warnings: Vec<HierarchyWarning>,
    pub broken_links: BrokenLinks,
}

/// Receives progress events while notes are exported.
pub trait ProgressReporter {
    /// Called after each note file is written.
    fn on_note(&mut self, _path: &Path) {}

    /// Called once the run has finished.
    fn on_complete(&mut self, _report: &ExportReport) {}
}

/// A [`ProgressReporter`] that ignores every event.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// Shared, read-only context for exporting individual notes.
struct NoteContext<'a, S, O> {
    storage: &'a S,
    output: &'a O,
    converter: &'a dyn HtmlConverter,
    options: &'a ExportOptions,
    plan: &'a ExportPlan,
}

/// What exporting a single note produced.
#[derive(Debug, Default)]
struct NoteOutcome {
    resources: usize,
    timestamps_set: bool,
    broken_links: BrokenLinks,
}

/// Exports `library` into `options.output_root`.
///
/// The hierarchy is walked and the whole plan computed before anything is
/// written, so structural errors surface before the first file.
///
/// # Errors
///
/// Returns `ExportError::OutputNotEmpty` if the output root already has
/// entries, any planning error, or an I/O error while writing. Failing to
/// set file times is counted in the report instead.
pub fn export_library<S, O>(
    library: &Library,
    storage: &S,
    output: &O,
    converter: &dyn HtmlConverter,
    options: &ExportOptions,
    reporter: &mut dyn ProgressReporter,
) -> Result<ExportReport, ExportError>
where
    S: Storage,
    O: OutputSink,
{
    let root = &options.output_root;
    if dir_has_entries(root).map_err(|e| ExportError::io(root, e))? {
        return Err(ExportError::OutputNotEmpty { path: root.clone() });
    }
    execute(library, storage, output, converter, options, reporter)
}

/// Walks, plans and renders every note without checking the output root.
///
/// With a [`crate::infra::DryRunOutput`] this is a full dry run: every
/// structural error and broken link is found but nothing is written.
pub fn execute<S, O>(
    library: &Library,
    storage: &S,
    output: &O,
    converter: &dyn HtmlConverter,
    options: &ExportOptions,
    reporter: &mut dyn ProgressReporter,
) -> Result<ExportReport, ExportError>
where
    S: Storage,
    O: OutputSink,
{
    let (planned, hierarchy_warnings) = plan_library(library, options)?;

    let ctx = NoteContext {
        storage,
        output,
        converter,
        options,
        plan: &planned.plan,
    };

    let mut report = ExportReport {
        hierarchy_warnings,
        ..ExportReport::default()
    };

    for notebook in &planned.notebooks {
        output
            .ensure_dir(&notebook.dir)
            .map_err(|e| ExportError::io(&notebook.dir, e))?;
        report.notebooks += 1;

        for planned_note in &notebook.notes {
            let outcome = export_note(&ctx, &notebook.dir, planned_note)?;
            report.notes += 1;
            report.resources += outcome.resources;
            if !outcome.timestamps_set {
                report.timestamp_failures += 1;
            }
            report.broken_links.extend(outcome.broken_links);
            reporter.on_note(&planned_note.path);
        }
    }

    info!(
        "exported {} notes in {} notebooks ({} resources)",
        report.notes, report.notebooks, report.resources
    );
    reporter.on_complete(&report);
    Ok(report)
}

/// Walks the hierarchy and computes the export plan.
pub fn plan_library<'a>(
    library: &'a Library,
    options: &ExportOptions,
) -> Result<(PlannedExport<'a>, Vec<HierarchyWarning>), ExportError> {
    let (walked, warnings) = collect_walk(library)?;
    let plan_options = PlanOptions {
        output_root: options.output_root.clone(),
        exclude: options.exclude.clone(),
    };
    let planned = plan(&walked, library.orphans(), &library.meta, &plan_options)?;
    debug!(
        "planned {} notes in {} notebooks",
        planned.note_count(),
        planned.notebooks.len()
    );
    Ok((planned, warnings))
}

fn export_note<S, O>(
    ctx: &NoteContext<'_, S, O>,
    notebook_dir: &Path,
    planned: &PlannedNote<'_>,
) -> Result<NoteOutcome, ExportError>
where
    S: Storage,
    O: OutputSink,
{
    let note = planned.note;
    let options = ctx.options;
    debug!("exporting '{}' to {}", note.title, planned.path.display());

    // Resource names are settled before any content is rewritten.
    let resources = ResourceMap::build(&note.resources, &options.png_extensions)?;
    let location = ResourceLocation::new(
        options.resource_layout,
        &options.output_root,
        notebook_dir,
        &note.id,
    );

    if !resources.is_empty() {
        ctx.output
            .ensure_dir(&location.dir)
            .map_err(|e| ExportError::io(&location.dir, e))?;
        let source_dir = note.resources_dir();
        for file in resources.files() {
            let src = source_dir.join(&file.original_name);
            let dst = location.dir.join(&file.final_name);
            ctx.output
                .copy_file(&src, &dst)
                .map_err(|e| ExportError::io(&src, e))?;
        }
    }

    let content = load_content(ctx.storage, note)?;
    let rewriter = ContentRewriter::new(
        ctx.plan,
        &resources,
        &location.prefix,
        &options.png_extensions,
        note,
    );
    let mut broken_links = BrokenLinks::new();
    let body = render_body(&content, ctx.converter, &rewriter, &mut broken_links);

    ctx.output
        .write_file(&planned.path, &serialize(note, &body))
        .map_err(|e| ExportError::io(&planned.path, e))?;

    let timestamps_set = match ctx
        .output
        .set_times(&planned.path, note.created_at, note.updated_at)
    {
        Ok(()) => true,
        Err(e) => {
            warn!("could not set times on {}: {e}", planned.path.display());
            false
        }
    };

    Ok(NoteOutcome {
        resources: resources.files().len(),
        timestamps_set,
        broken_links,
    })
}
