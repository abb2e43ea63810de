//! YAML front matter for exported notes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::{Note, NoteId};

/// Value of the `source` key in every exported note.
pub const SOURCE: &str = "quiver";

#[derive(Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    uuid: &'a NoteId,
    source: &'static str,
    created: String,
    updated: String,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
}

/// Formats a timestamp as RFC 3339 UTC with second precision.
pub fn iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serializes a note's metadata and body to markdown with YAML front matter.
///
/// # Format
/// ```text
/// ---
/// title: Note Title
/// uuid: 0B7E5C1A-1D2F-4C3B-9A8E-7F6D5C4B3A21
/// source: quiver
/// created: 2024-01-15T10:30:00Z
/// updated: 2024-01-15T10:30:00Z
/// tags:
/// - rust
/// ---
/// Body content here...
/// ```
///
/// `tags` is omitted when the note has none.
pub fn serialize(note: &Note, body: &str) -> String {
    let front = FrontMatter {
        title: &note.title,
        uuid: &note.id,
        source: SOURCE,
        created: iso8601(note.created_at),
        updated: iso8601(note.updated_at),
        tags: &note.tags,
    };
    let yaml = serde_yaml::to_string(&front).expect("front matter serialization is infallible");
    if body.is_empty() {
        format!("---\n{yaml}---\n")
    } else {
        format!("---\n{yaml}---\n\n{body}\n")
    }
}
