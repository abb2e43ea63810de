//! Core types: library hierarchy, notebooks, notes, content cells, broken links

mod broken_link;
mod content;
mod ids;
mod library;

pub use broken_link::{BrokenLink, BrokenLinkGroup, BrokenLinks};
pub use content::{Cell, CellKind, NoteContent};
pub use ids::{NoteId, NotebookId};
pub use library::{Library, LibraryMeta, Note, Notebook, ResourceRef};
