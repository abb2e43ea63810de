//! Read access to the source library on disk.

use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors while reading the source library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LibraryError {
    /// Creates an appropriate LibraryError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => LibraryError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => LibraryError::PermissionDenied { path: path.into() },
            _ => LibraryError::Io {
                path: path.into(),
                source: error,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }
}

/// The storage operations the library loader needs.
pub trait Storage {
    /// Names of the direct children of `dir`, sorted.
    fn list_children(&self, dir: &Path) -> Result<Vec<String>, LibraryError>;

    /// Reads and parses a JSON file.
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, LibraryError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// [`Storage`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn list_children(&self, dir: &Path) -> Result<Vec<String>, LibraryError> {
        if !dir.exists() {
            return Err(LibraryError::NotFound { path: dir.into() });
        }
        if !dir.is_dir() {
            return Err(LibraryError::NotADirectory { path: dir.into() });
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| LibraryError::Walk {
                path: dir.into(),
                source: e,
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, LibraryError> {
        let bytes = std::fs::read(path).map_err(|e| LibraryError::from_io(path, e))?;
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
        serde_json::from_slice(bytes).map_err(|e| LibraryError::InvalidJson {
            path: path.into(),
            source: e,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
