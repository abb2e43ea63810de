//! Opaque identifiers for notebooks and notes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a notebook (a `*.qvnotebook` directory).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookId(String);

/// Identifier of a note. Unique across the whole library.
///
/// Quiver uses upper-case hyphenated UUIDs, but links inside content are not
/// always written in the same case, so comparisons go through [`NoteId::new`]
/// which normalizes to upper case.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NotebookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl NoteId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotebookId(\"{}\")", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

impl From<&str> for NotebookId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_normalizes_case() {
        let lower = NoteId::new("0b7e5c1a-1d2f-4c3b-9a8e-7f6d5c4b3a21");
        let upper = NoteId::new("0B7E5C1A-1D2F-4C3B-9A8E-7F6D5C4B3A21");
        assert_eq!(lower, upper);
        assert_eq!(lower.as_str(), "0B7E5C1A-1D2F-4C3B-9A8E-7F6D5C4B3A21");
    }

    #[test]
    fn notebook_id_is_kept_verbatim() {
        let id = NotebookId::new("Inbox");
        assert_eq!(id.to_string(), "Inbox");
        assert_eq!(format!("{:?}", id), "NotebookId(\"Inbox\")");
    }

    #[test]
    fn note_id_serializes_as_plain_string() {
        let id = NoteId::new("ABC");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ABC\"");
    }
}
