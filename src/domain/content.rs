//! Note content: an ordered sequence of typed cells.

use serde::Deserialize;

/// The kind tag of a content cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Markdown,
    /// Rich text, stored as HTML.
    #[serde(rename = "text")]
    RichText,
    Code,
    Latex,
    Diagram,
}

/// One unit of note content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    #[serde(rename = "data", default)]
    pub payload: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "diagramType", default)]
    pub diagram_kind: Option<String>,
}

impl Cell {
    pub fn new(kind: CellKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            language: None,
            diagram_kind: None,
        }
    }
}

/// The parsed `content.json` of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub cells: Vec<Cell>,
}
