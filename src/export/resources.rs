//! Per-note resource naming and location.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::ExportError;
use super::collision;
use super::resource_name::{PngExtensions, normalize_resource_name};
use crate::domain::{NoteId, ResourceRef};

/// Where resource files are placed relative to the exported notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceLayout {
    /// `<notebook dir>/_resources/<note id>/`
    #[default]
    Note,
    /// `<output root>/resources/<note id>/`
    Library,
}

/// A resource file to copy: original name in the note, final name on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub original_name: String,
    pub final_name: String,
}

/// Mapping from resource names as they may appear in content to final file
/// names, valid for a single note's resource directory.
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    names: HashMap<String, String>,
    files: Vec<ResourceFile>,
}

impl ResourceMap {
    /// Names every resource of a note, in declared order.
    ///
    /// Each name is normalized, then made unique among the names already
    /// assigned in this note. Both the original and the normalized name map
    /// to the final name, so references written either way resolve.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::RenameExhausted` if a name cannot be made unique.
    pub fn build(resources: &[ResourceRef], png_exts: &PngExtensions) -> Result<Self, ExportError> {
        let mut map = ResourceMap::default();
        let mut used: Vec<String> = Vec::with_capacity(resources.len());

        for resource in resources {
            let normalized = normalize_resource_name(&resource.original_name, png_exts);
            let final_name = collision::resolve_file_name(&normalized, &used, 2)?;

            map.names
                .insert(resource.original_name.clone(), final_name.clone());
            map.names
                .entry(normalized)
                .or_insert_with(|| final_name.clone());
            used.push(final_name.clone());
            map.files.push(ResourceFile {
                original_name: resource.original_name.clone(),
                final_name,
            });
        }

        Ok(map)
    }

    /// Looks up the final name for a reference, exactly as written.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn files(&self) -> &[ResourceFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Where one note's resources live on disk and how content refers to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    pub dir: PathBuf,
    /// Link prefix relative to the note file, always `/`-separated and
    /// ending in `/`.
    pub prefix: String,
}

impl ResourceLocation {
    pub fn new(
        layout: ResourceLayout,
        output_root: &Path,
        notebook_dir: &Path,
        note_id: &NoteId,
    ) -> Self {
        match layout {
            ResourceLayout::Note => Self {
                dir: notebook_dir.join("_resources").join(note_id.as_str()),
                prefix: format!("_resources/{note_id}/"),
            },
            ResourceLayout::Library => {
                let depth = notebook_dir
                    .strip_prefix(output_root)
                    .map(|rel| rel.components().count())
                    .unwrap_or(0);
                Self {
                    dir: output_root.join("resources").join(note_id.as_str()),
                    prefix: format!("{}resources/{note_id}/", "../".repeat(depth)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEX: &str = "0123456789ABCDEF0123456789ABCDEF";

    fn refs(names: &[&str]) -> Vec<ResourceRef> {
        names.iter().map(|n| ResourceRef::new(*n)).collect()
    }

    fn finals(map: &ResourceMap) -> Vec<&str> {
        map.files().iter().map(|f| f.final_name.as_str()).collect()
    }

    #[test]
    fn keeps_distinct_names() {
        let map = ResourceMap::build(&refs(&["a.png", "b.pdf"]), &PngExtensions::default()).unwrap();
        assert_eq!(finals(&map), vec!["a.png", "b.pdf"]);
        assert_eq!(map.get("b.pdf"), Some("b.pdf"));
    }

    #[test]
    fn hex_ids_resolve_with_and_without_extension() {
        let map = ResourceMap::build(&refs(&[HEX]), &PngExtensions::default()).unwrap();
        let expected = format!("{HEX}.png");
        assert_eq!(map.get(HEX), Some(expected.as_str()));
        assert_eq!(map.get(&expected), Some(expected.as_str()));
    }

    #[test]
    fn names_colliding_after_normalization_get_suffixes() {
        let exts = PngExtensions::new(["tiff"]);
        let map = ResourceMap::build(&refs(&["scan.png", "scan.tiff"]), &exts).unwrap();
        assert_eq!(finals(&map), vec!["scan.png", "scan 2.png"]);
        assert_eq!(map.get("scan.tiff"), Some("scan 2.png"));
        // The normalized spelling keeps pointing at the first file.
        assert_eq!(map.get("scan.png"), Some("scan.png"));
    }

    #[test]
    fn names_differing_only_in_case_get_suffixes() {
        let map = ResourceMap::build(&refs(&["img.png", "IMG.png"]), &PngExtensions::default()).unwrap();
        assert_eq!(finals(&map), vec!["img.png", "IMG 2.png"]);
        assert_eq!(map.get("IMG.png"), Some("IMG 2.png"));
        assert_eq!(map.get("img.png"), Some("img.png"));
    }

    #[test]
    fn note_layout_is_inside_notebook_dir() {
        let loc = ResourceLocation::new(
            ResourceLayout::Note,
            Path::new("out"),
            Path::new("out/A/B"),
            &NoteId::new("n1"),
        );
        assert_eq!(loc.dir, PathBuf::from("out/A/B/_resources/N1"));
        assert_eq!(loc.prefix, "_resources/N1/");
    }

    #[test]
    fn library_layout_climbs_to_output_root() {
        let loc = ResourceLocation::new(
            ResourceLayout::Library,
            Path::new("out"),
            Path::new("out/A/B"),
            &NoteId::new("n1"),
        );
        assert_eq!(loc.dir, PathBuf::from("out/resources/N1"));
        assert_eq!(loc.prefix, "../../resources/N1/");
    }
}
