//! Output path planning for every exported notebook and note.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use super::ExportError;
use super::collision;
use super::hierarchy::WalkedNotebook;
use crate::domain::{LibraryMeta, Note, NoteId, Notebook};

/// Name used when a title or notebook name sanitizes to nothing.
const UNTITLED: &str = "Untitled";

/// Library-wide mapping from note id to its output file.
///
/// Entries can only be added, and adding an id twice fails.
#[derive(Debug, Clone, Default)]
pub struct ExportPlan {
    paths: HashMap<NoteId, PathBuf>,
}

impl ExportPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the output path of a note.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::DuplicateNoteId` if `id` is already planned.
    pub fn insert(&mut self, id: NoteId, path: PathBuf) -> Result<(), ExportError> {
        match self.paths.entry(id) {
            Entry::Occupied(existing) => Err(ExportError::DuplicateNoteId {
                id: existing.key().clone(),
                first_path: existing.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(path);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &NoteId) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    /// The output file name of a note without its `.md` extension.
    pub fn file_stem(&self, id: &NoteId) -> Option<&str> {
        self.get(id)
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A note with its planned output file.
#[derive(Debug, Clone)]
pub struct PlannedNote<'a> {
    pub note: &'a Note,
    pub path: PathBuf,
}

/// A notebook that gets an output directory.
#[derive(Debug, Clone)]
pub struct PlannedNotebook<'a> {
    pub notebook: &'a Notebook,
    pub dir: PathBuf,
    pub notes: Vec<PlannedNote<'a>>,
}

/// The complete plan: per-notebook layout plus the global id mapping.
#[derive(Debug, Clone, Default)]
pub struct PlannedExport<'a> {
    pub notebooks: Vec<PlannedNotebook<'a>>,
    pub plan: ExportPlan,
}

impl PlannedExport<'_> {
    pub fn note_count(&self) -> usize {
        self.plan.len()
    }
}

/// Inputs that shape the plan besides the library itself.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub output_root: PathBuf,
    /// Notebook display names that are never exported.
    pub exclude: Vec<String>,
}

impl PlanOptions {
    fn excludes(&self, notebook: &Notebook) -> bool {
        self.exclude.iter().any(|name| name.trim() == notebook.name.trim())
    }
}

/// Computes the output path of every exported note.
///
/// Walked notebooks are laid out under the names of all their ancestors;
/// a walked notebook with neither notes nor declared children is skipped.
/// Orphans go directly under the output root and are skipped when empty.
///
/// Several notebooks can land in the same directory (siblings with one
/// display name, an orphan named like a top-level notebook, or a name
/// containing `/`). Note file names are made unique per output directory,
/// ignoring case, across all of them.
///
/// # Errors
///
/// Returns `ExportError::DuplicateNoteId` if any note id occurs twice across
/// all planned notebooks, or `ExportError::RenameExhausted` if a notebook
/// holds too many notes with the same title.
pub fn plan<'a, I>(
    walked: &[WalkedNotebook<'a>],
    orphans: I,
    meta: &LibraryMeta,
    options: &PlanOptions,
) -> Result<PlannedExport<'a>, ExportError>
where
    I: IntoIterator<Item = &'a Notebook>,
{
    let mut planned = PlannedExport::default();
    let mut used_names = UsedNames::default();

    for entry in walked {
        let notebook = entry.notebook;
        let has_notes = !notebook.notes.is_empty();
        let has_descendants = meta
            .find_children(&notebook.id)
            .is_some_and(|children| !children.is_empty());
        if (!has_notes && !has_descendants) || options.excludes(notebook) {
            continue;
        }

        let mut dir = options.output_root.clone();
        for ancestor in &entry.ancestors {
            dir.push(normalize_segment(&ancestor.name));
        }
        dir.push(normalize_segment(&notebook.name));

        plan_notebook(&mut planned, &mut used_names, notebook, dir)?;
    }

    for notebook in orphans {
        if notebook.notes.is_empty() || options.excludes(notebook) {
            continue;
        }
        let dir = options.output_root.join(normalize_segment(&notebook.name));
        plan_notebook(&mut planned, &mut used_names, notebook, dir)?;
    }

    Ok(planned)
}

/// File stems already assigned, keyed by lower-cased output directory.
#[derive(Debug, Default)]
struct UsedNames(HashMap<String, Vec<String>>);

impl UsedNames {
    fn in_dir(&mut self, dir: &Path) -> &mut Vec<String> {
        self.0
            .entry(dir.to_string_lossy().to_lowercase())
            .or_default()
    }
}

fn plan_notebook<'a>(
    planned: &mut PlannedExport<'a>,
    used_names: &mut UsedNames,
    notebook: &'a Notebook,
    dir: PathBuf,
) -> Result<(), ExportError> {
    let used = used_names.in_dir(&dir);
    let mut notes = Vec::with_capacity(notebook.notes.len());

    for note in &notebook.notes {
        let name = collision::resolve(&sanitize_title(&note.title), used.as_slice(), 2)?;
        let path = dir.join(format!("{name}.md"));
        planned.plan.insert(note.id.clone(), path.clone())?;
        used.push(name);
        notes.push(PlannedNote { note, path });
    }

    planned.notebooks.push(PlannedNotebook {
        notebook,
        dir,
        notes,
    });
    Ok(())
}

/// Turns a notebook display name into a relative directory path.
///
/// The name is split on `/`, each segment trimmed, and empty, `.` and `..`
/// segments dropped before rejoining.
pub fn normalize_segment(name: &str) -> PathBuf {
    let path: PathBuf = name
        .split('/')
        .map(str::trim)
        .filter(|seg| !seg.is_empty() && *seg != "." && *seg != "..")
        .collect();
    if path.as_os_str().is_empty() {
        PathBuf::from(UNTITLED)
    } else {
        path
    }
}

/// Turns a note title into a file name stem.
///
/// Path separators become `-` and surrounding whitespace is trimmed.
pub fn sanitize_title(title: &str) -> String {
    let sanitized = title.replace(['/', '\\'], "-");
    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}
