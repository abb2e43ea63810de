//! Note links whose target is not part of the export.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::NoteId;

/// A note-to-note reference whose target id has no entry in the export plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub source_note_title: String,
    pub source_note_id: NoteId,
    pub target_note_id: NoteId,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}) links to missing note {}",
            self.source_note_title, self.source_note_id, self.target_note_id
        )
    }
}

/// Append-only collection of broken links gathered over an export run.
///
/// Entries are never removed. Consumers only rely on the complete set,
/// so the append order carries no meaning.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BrokenLinks {
    entries: Vec<BrokenLink>,
}

/// Broken links originating from a single source note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLinkGroup<'a> {
    pub source_note_id: &'a NoteId,
    pub source_note_title: &'a str,
    pub targets: Vec<&'a NoteId>,
}

impl BrokenLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: BrokenLink) {
        self.entries.push(link);
    }

    /// Moves every entry of `other` into this collection.
    pub fn extend(&mut self, other: BrokenLinks) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrokenLink> {
        self.entries.iter()
    }

    /// Groups entries by source note, ordered by source note id.
    pub fn by_source(&self) -> Vec<BrokenLinkGroup<'_>> {
        let mut groups: BTreeMap<&NoteId, BrokenLinkGroup<'_>> = BTreeMap::new();
        for link in &self.entries {
            groups
                .entry(&link.source_note_id)
                .or_insert_with(|| BrokenLinkGroup {
                    source_note_id: &link.source_note_id,
                    source_note_title: &link.source_note_title,
                    targets: Vec::new(),
                })
                .targets
                .push(&link.target_note_id);
        }
        groups.into_values().collect()
    }
}
