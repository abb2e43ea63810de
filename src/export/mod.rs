//! Export of a Quiver library to a directory tree of markdown files.
//!
//! The pipeline runs leaves first: the hierarchy walker validates the
//! declared notebook tree, the planner assigns every note an output path,
//! and the executor renders each note, renaming resources and rewriting
//! references on the way.

mod error;
mod executor;
mod render;

pub mod collision;
pub mod hierarchy;
pub mod html;
pub mod plan;
pub mod resource_name;
pub mod resources;
pub mod rewrite;

pub use error::ExportError;
pub use executor::{
    ExportOptions, ExportReport, NoProgress, ProgressReporter, execute, export_library, plan_library,
};
pub use hierarchy::{HierarchyWarning, WalkedNotebook, collect_walk, walk};
pub use html::{BasicHtmlConverter, HtmlConverter};
pub use plan::{ExportPlan, PlanOptions, PlannedExport, PlannedNote, PlannedNotebook};
pub use resource_name::{NameContext, PngExtensions, ReferenceNormalizer, normalize_resource_name};
pub use resources::{ResourceLayout, ResourceLocation, ResourceMap};
pub use rewrite::ContentRewriter;
