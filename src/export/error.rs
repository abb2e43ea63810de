//! Structural errors that abort an export run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{NoteId, NotebookId};
use crate::infra::LibraryError;

/// Fatal inconsistencies found while planning or executing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("duplicate note id {id}: already planned at {first_path}")]
    DuplicateNoteId { id: NoteId, first_path: PathBuf },

    #[error("hierarchy cycle: notebook {id} appears in its own ancestor chain")]
    HierarchyCycle { id: NotebookId },

    #[error("could not find a free name for '{candidate}' after {attempts} attempts")]
    RenameExhausted { candidate: String, attempts: u32 },

    #[error("output directory already contains files: {path}")]
    OutputNotEmpty { path: PathBuf },

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
