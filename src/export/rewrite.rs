//! Rewriting of resource references and note links inside note content.
//!
//! Steps run in a fixed order, each working on the output of the previous:
//! legacy resource prefixes are replaced, the referenced names normalized,
//! normalized names mapped to final file names, and finally note links
//! resolved against the export plan.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::plan::ExportPlan;
use super::resource_name::{NameContext, PngExtensions, ReferenceNormalizer};
use super::resources::ResourceMap;
use crate::domain::{BrokenLink, BrokenLinks, Note, NoteId};

/// Legacy prefix of embedded images.
pub const IMAGE_URL_PREFIX: &str = "quiver-image-url/";
/// Legacy prefix of attached files.
pub const FILE_URL_PREFIX: &str = "quiver-file-url/";

const NOTE_URL_SCHEMES: &str = r"(?:quiver-note-url/|quiver:///notes/)";
const UUID: &str = r"([0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})";

/// `[text](scheme UUID)`
static NOTE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[([^\]\n]*)\]\({NOTE_URL_SCHEMES}{UUID}\)")).unwrap()
});

/// `scheme UUID` outside link syntax.
static BARE_NOTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("{NOTE_URL_SCHEMES}{UUID}")).unwrap());

/// Rewrites the markdown of one note.
///
/// Holds only borrowed, read-only context; broken links are appended to the
/// accumulator passed to [`ContentRewriter::rewrite`].
pub struct ContentRewriter<'a> {
    plan: &'a ExportPlan,
    resources: &'a ResourceMap,
    resource_prefix: &'a str,
    png_exts: &'a PngExtensions,
    source: &'a Note,
    paren_refs: ReferenceNormalizer,
    bare_refs: ReferenceNormalizer,
    final_name_re: Regex,
}

impl<'a> ContentRewriter<'a> {
    pub fn new(
        plan: &'a ExportPlan,
        resources: &'a ResourceMap,
        resource_prefix: &'a str,
        png_exts: &'a PngExtensions,
        source: &'a Note,
    ) -> Self {
        // name, then terminator or end of text
        let final_name_re = Regex::new(&format!(
            r#"{}([^\s)\\?#"'<>]+)(?:([)\\\s?#"'<>])|$)"#,
            regex::escape(resource_prefix)
        ))
        .unwrap();

        Self {
            plan,
            resources,
            resource_prefix,
            png_exts,
            source,
            paren_refs: ReferenceNormalizer::new(resource_prefix, NameContext::ParenLink),
            bare_refs: ReferenceNormalizer::new(resource_prefix, NameContext::Bare),
            final_name_re,
        }
    }

    /// Rewrites one cell of markdown-like text.
    pub fn rewrite(&self, text: &str, broken: &mut BrokenLinks) -> String {
        let text = self.replace_legacy_prefixes(text);
        let text = self.normalize_names(&text);
        let text = self.map_final_names(&text);
        self.resolve_note_links(&text, broken)
    }

    fn replace_legacy_prefixes(&self, text: &str) -> String {
        text.replace(IMAGE_URL_PREFIX, self.resource_prefix)
            .replace(FILE_URL_PREFIX, self.resource_prefix)
    }

    fn normalize_names(&self, text: &str) -> String {
        let text = self.paren_refs.apply(text, self.png_exts);
        self.bare_refs.apply(&text, self.png_exts)
    }

    /// Replaces each referenced name with its final file name.
    ///
    /// Unmapped references are left as they are so a missing file stays
    /// visible in the output.
    fn map_final_names(&self, text: &str) -> String {
        self.final_name_re
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                let terminator = caps.get(2).map_or("", |m| m.as_str());
                let mapped = self
                    .resources
                    .get(name)
                    .or_else(|| self.resources.get(&format!("{name}.png")));
                match mapped {
                    Some(final_name) => {
                        format!("{}{final_name}{terminator}", self.resource_prefix)
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn resolve_note_links(&self, text: &str, broken: &mut BrokenLinks) -> String {
        let text = NOTE_LINK_RE.replace_all(text, |caps: &Captures| {
            let stem = self.link_target(&caps[2], broken);
            let label = caps[1].trim();
            if label.is_empty() || label == stem {
                format!("[[{stem}]]")
            } else {
                format!("[[{stem}|{label}]]")
            }
        });

        BARE_NOTE_URL_RE
            .replace_all(&text, |caps: &Captures| {
                format!("[[{}]]", self.link_target(&caps[1], broken))
            })
            .into_owned()
    }

    /// The wiki-link target for a note id, recording a broken link on a miss.
    fn link_target(&self, raw_id: &str, broken: &mut BrokenLinks) -> String {
        let target = NoteId::new(raw_id);
        match self.plan.file_stem(&target) {
            Some(stem) => stem.to_string(),
            None => {
                broken.push(BrokenLink {
                    source_note_title: self.source.title.clone(),
                    source_note_id: self.source.id.clone(),
                    target_note_id: target,
                });
                raw_id.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceRef;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const HEX: &str = "0123456789ABCDEF0123456789ABCDEF";
    const TARGET: &str = "0B7E5C1A-1D2F-4C3B-9A8E-7F6D5C4B3A21";
    const MISSING: &str = "11111111-2222-3333-4444-555555555555";
    const PREFIX: &str = "_resources/SRC/";

    // ===========================================
    // Test Helpers
    // ===========================================

    fn source_note() -> Note {
        Note {
            id: NoteId::new("SRC"),
            title: "Source".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: Vec::new(),
            dir: PathBuf::from("SRC.qvnote"),
            resources: Vec::new(),
        }
    }

    fn plan() -> ExportPlan {
        let mut plan = ExportPlan::new();
        plan.insert(NoteId::new(TARGET), PathBuf::from("out/Work/Target Note.md"))
            .unwrap();
        plan
    }

    fn resources(names: &[&str], exts: &PngExtensions) -> ResourceMap {
        let refs: Vec<_> = names.iter().map(|n| ResourceRef::new(*n)).collect();
        ResourceMap::build(&refs, exts).unwrap()
    }

    fn rewrite_with(
        text: &str,
        names: &[&str],
        exts: &PngExtensions,
    ) -> (String, BrokenLinks) {
        let note = source_note();
        let plan = plan();
        let map = resources(names, exts);
        let rewriter = ContentRewriter::new(&plan, &map, PREFIX, exts, &note);
        let mut broken = BrokenLinks::new();
        let out = rewriter.rewrite(text, &mut broken);
        (out, broken)
    }

    fn rewrite(text: &str, names: &[&str]) -> (String, BrokenLinks) {
        rewrite_with(text, names, &PngExtensions::default())
    }

    // ===========================================
    // Resource references
    // ===========================================

    #[test]
    fn replaces_image_and_file_prefixes() {
        let (out, _) = rewrite(
            "![](quiver-image-url/a.png) [doc](quiver-file-url/doc.pdf)",
            &["a.png", "doc.pdf"],
        );
        assert_eq!(out, "![](_resources/SRC/a.png) [doc](_resources/SRC/doc.pdf)");
    }

    #[test]
    fn hex_reference_without_extension_maps_to_png() {
        let (out, _) = rewrite(&format!("![](quiver-image-url/{HEX})"), &[HEX]);
        assert_eq!(out, format!("![](_resources/SRC/{HEX}.png)"));
    }

    #[test]
    fn query_suffix_is_stripped_before_lookup() {
        let (out, _) = rewrite("![](quiver-image-url/a.jpg?w=300)", &["a.jpg"]);
        assert_eq!(out, "![](_resources/SRC/a.jpg)");
    }

    #[test]
    fn renamed_resources_follow_the_map() {
        let exts = PngExtensions::new(["tiff"]);
        let (out, _) = rewrite_with(
            "![](quiver-image-url/scan.png) ![](quiver-image-url/scan.tiff)",
            &["scan.png", "scan.tiff"],
            &exts,
        );
        // Both normalize to scan.png in content, which maps to the first file.
        assert_eq!(out, "![](_resources/SRC/scan.png) ![](_resources/SRC/scan.png)");
    }

    #[test]
    fn extension_retry_finds_png_entries() {
        // Lower-case ids are not hex ids, so the content keeps no extension.
        let (out, _) = rewrite("![](quiver-image-url/abc)", &["abc.png"]);
        assert_eq!(out, "![](_resources/SRC/abc.png)");
    }

    #[test]
    fn unmapped_reference_is_left_visible() {
        let (out, _) = rewrite("![](quiver-image-url/missing.png)", &[]);
        assert_eq!(out, "![](_resources/SRC/missing.png)");
    }

    #[test]
    fn bare_reference_at_end_of_text_is_mapped() {
        let (out, _) = rewrite(&format!("see quiver-file-url/{HEX}"), &[HEX]);
        assert_eq!(out, format!("see _resources/SRC/{HEX}.png"));
    }

    #[test]
    fn html_image_reference_is_mapped() {
        let (out, _) = rewrite(&format!("<img src=\"quiver-image-url/{HEX}\">"), &[HEX]);
        assert_eq!(out, format!("<img src=\"_resources/SRC/{HEX}.png\">"));
    }

    // ===========================================
    // Note links
    // ===========================================

    #[test]
    fn resolved_note_link_uses_file_stem() {
        let (out, broken) = rewrite(&format!("See [the plan](quiver-note-url/{TARGET})."), &[]);
        assert_eq!(out, "See [[Target Note|the plan]].");
        assert!(broken.is_empty());
    }

    #[test]
    fn both_schemes_and_any_case_resolve() {
        let lower = TARGET.to_ascii_lowercase();
        let (out, broken) = rewrite(&format!("[Target Note](quiver:///notes/{lower})"), &[]);
        assert_eq!(out, "[[Target Note]]");
        assert!(broken.is_empty());
    }

    #[test]
    fn bare_note_url_becomes_wiki_link() {
        let (out, _) = rewrite(&format!("quiver-note-url/{TARGET}"), &[]);
        assert_eq!(out, "[[Target Note]]");
    }

    #[test]
    fn missing_target_keeps_id_and_records_one_broken_link() {
        let (out, broken) = rewrite(&format!("[gone](quiver-note-url/{MISSING})"), &[]);
        assert_eq!(out, format!("[[{MISSING}|gone]]"));
        assert_eq!(broken.len(), 1);
        let link = broken.iter().next().unwrap();
        assert_eq!(link.source_note_title, "Source");
        assert_eq!(link.source_note_id, NoteId::new("SRC"));
        assert_eq!(link.target_note_id, NoteId::new(MISSING));
    }

    #[test]
    fn external_links_are_untouched() {
        let text = "[site](https://example.com) and [anchor](#top)";
        let (out, broken) = rewrite(text, &[]);
        assert_eq!(out, text);
        assert!(broken.is_empty());
    }
}
