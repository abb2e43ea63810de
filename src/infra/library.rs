//! Loading of a Quiver library (`*.qvlibrary`) into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use super::storage::{LibraryError, Storage};
use crate::domain::{Library, LibraryMeta, Note, NoteContent, NoteId, Notebook, NotebookId, ResourceRef};

const NOTEBOOK_EXT: &str = ".qvnotebook";
const NOTE_EXT: &str = ".qvnote";
const META_FILE: &str = "meta.json";

#[derive(Debug, Deserialize)]
struct RawHierarchy {
    #[serde(default)]
    uuid: String,
    #[serde(default)]
    children: Vec<RawHierarchy>,
}

impl From<RawHierarchy> for LibraryMeta {
    fn from(raw: RawHierarchy) -> Self {
        LibraryMeta::new(raw.uuid, raw.children.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize)]
struct RawNotebookMeta {
    uuid: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawNoteMeta {
    uuid: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    created_at: f64,
    #[serde(default)]
    updated_at: f64,
    #[serde(default)]
    tags: Vec<String>,
}

/// Loads the declared hierarchy and every notebook and note on disk.
///
/// A missing library `meta.json` yields an empty hierarchy, so every
/// notebook is treated as undeclared. Note content is not read here.
///
/// # Errors
///
/// Returns `LibraryError` if the root is not a directory or any notebook or
/// note `meta.json` is missing or malformed.
pub fn load_library<S: Storage>(storage: &S, root: &Path) -> Result<Library, LibraryError> {
    if !storage.is_dir(root) {
        return Err(if storage.exists(root) {
            LibraryError::NotADirectory { path: root.into() }
        } else {
            LibraryError::NotFound { path: root.into() }
        });
    }

    let meta_path = root.join(META_FILE);
    let meta: LibraryMeta = if storage.exists(&meta_path) {
        storage.read_json::<RawHierarchy>(&meta_path)?.into()
    } else {
        warn!("no hierarchy file at {}; exporting all notebooks flat", meta_path.display());
        LibraryMeta::leaf("")
    };

    let mut notebooks = Vec::new();
    for name in storage.list_children(root)? {
        let dir = root.join(&name);
        if !name.ends_with(NOTEBOOK_EXT) || !storage.is_dir(&dir) {
            continue;
        }
        notebooks.push(load_notebook(storage, &dir)?);
    }

    Ok(Library::new(root, meta, notebooks))
}

fn load_notebook<S: Storage>(storage: &S, dir: &Path) -> Result<Notebook, LibraryError> {
    let meta: RawNotebookMeta = storage.read_json(&dir.join(META_FILE))?;

    let mut notes = Vec::new();
    for name in storage.list_children(dir)? {
        let note_dir = dir.join(&name);
        if !name.ends_with(NOTE_EXT) || !storage.is_dir(&note_dir) {
            continue;
        }
        notes.push(load_note(storage, &note_dir)?);
    }

    debug!("loaded notebook '{}' with {} notes", meta.name, notes.len());
    Ok(Notebook {
        id: NotebookId::new(meta.uuid),
        name: meta.name,
        dir: dir.to_path_buf(),
        notes,
    })
}

fn load_note<S: Storage>(storage: &S, dir: &Path) -> Result<Note, LibraryError> {
    let meta: RawNoteMeta = storage.read_json(&dir.join(META_FILE))?;

    let resources_dir = dir.join("resources");
    let resources = match storage.list_children(&resources_dir) {
        Ok(names) => names
            .into_iter()
            .filter(|name| !name.starts_with('.') && !storage.is_dir(&resources_dir.join(name)))
            .map(ResourceRef::new)
            .collect(),
        Err(e) if e.is_not_found() => Vec::new(),
        Err(e) => return Err(e),
    };

    Ok(Note {
        id: NoteId::new(&meta.uuid),
        title: meta.title,
        created_at: timestamp(meta.created_at),
        updated_at: timestamp(meta.updated_at),
        tags: meta.tags,
        dir: dir.to_path_buf(),
        resources,
    })
}

/// Reads a note's `content.json`.
pub fn load_content<S: Storage>(storage: &S, note: &Note) -> Result<NoteContent, LibraryError> {
    storage.read_json(&note.content_path())
}

fn timestamp(secs: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs.trunc() as i64, 0).unwrap_or_default()
}
