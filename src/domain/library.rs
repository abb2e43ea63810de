//! Read-only snapshot of a Quiver library: declared hierarchy, notebooks, notes.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use super::{NoteId, NotebookId};

/// A node of the declared notebook hierarchy (the library `meta.json`).
///
/// The root node's own id is not a notebook; its children are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryMeta {
    pub id: NotebookId,
    pub children: Vec<LibraryMeta>,
}

impl LibraryMeta {
    pub fn new(id: impl Into<String>, children: Vec<LibraryMeta>) -> Self {
        Self {
            id: NotebookId::new(id),
            children,
        }
    }

    /// A node with no children.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    /// Finds the declared children of `id` anywhere in this tree.
    ///
    /// Returns `None` when `id` is not declared at all, and `Some(&[])` when it
    /// is declared without children. The search is depth-first and returns
    /// the first match. Recursion is bounded by the tree depth; cycles cannot
    /// occur in an owned tree.
    pub fn find_children(&self, id: &NotebookId) -> Option<&[LibraryMeta]> {
        if &self.id == id {
            return Some(&self.children);
        }
        self.children.iter().find_map(|child| child.find_children(id))
    }

    /// Returns true if `id` appears anywhere below this node (root excluded).
    pub fn declares(&self, id: &NotebookId) -> bool {
        self.children
            .iter()
            .any(|child| child.find_children(id).is_some())
    }
}

/// A resource file attached to a note. Only the name is modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub original_name: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            original_name: name.into(),
        }
    }
}

/// A note as discovered on disk. Content is loaded later from `dir`.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
    /// The `*.qvnote` directory holding `content.json` and `resources/`.
    pub dir: PathBuf,
    pub resources: Vec<ResourceRef>,
}

impl Note {
    /// Directory holding this note's resource files.
    pub fn resources_dir(&self) -> PathBuf {
        self.dir.join("resources")
    }

    /// Path to the lazily-loaded content file.
    pub fn content_path(&self) -> PathBuf {
        self.dir.join("content.json")
    }
}

/// A notebook as discovered on disk, independent of the declared hierarchy.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    pub dir: PathBuf,
    pub notes: Vec<Note>,
}

/// Everything loaded from a library directory at start-up.
#[derive(Debug, Clone)]
pub struct Library {
    pub root: PathBuf,
    pub meta: LibraryMeta,
    pub notebooks: Vec<Notebook>,
}

impl Library {
    pub fn new(root: impl AsRef<Path>, meta: LibraryMeta, notebooks: Vec<Notebook>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            meta,
            notebooks,
        }
    }

    /// Looks up a discovered notebook by id.
    pub fn notebook(&self, id: &NotebookId) -> Option<&Notebook> {
        self.notebooks.iter().find(|nb| &nb.id == id)
    }

    /// Notebooks present on disk that the declared hierarchy never mentions.
    pub fn orphans(&self) -> impl Iterator<Item = &Notebook> {
        self.notebooks
            .iter()
            .filter(|nb| !self.meta.declares(&nb.id))
    }
}
