//! Normalization of resource file names.
//!
//! The same rules apply to a bare file name (when copying a resource) and to a
//! file name embedded in note content (when rewriting references), so the two
//! always agree on the final name.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Extensions recognised when stripping query-like garbage from a name.
const KNOWN_EXTENSIONS: &str = "png|jpe?g|gif|bmp|tiff?|webp|svg|heic|ico|pdf";

/// `<stem>.<ext>` followed by whitespace, `&` or `?` and anything after it.
static QUERY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)^(.+?\.(?:{KNOWN_EXTENSIONS}))[\s&?].*$")).unwrap()
});

/// Quiver's internal resource ids: 32 upper-case hex characters, no extension.
static HEX_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9A-F]{32}$").unwrap());

/// Extensions that are rewritten to `.png`, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngExtensions(BTreeSet<String>);

impl PngExtensions {
    /// Builds the set, ignoring case and any leading dot.
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            exts.into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn contains(&self, ext: &str) -> bool {
        self.0.contains(&ext.to_ascii_lowercase())
    }
}

/// Where the name being normalized was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    /// A file name on disk.
    File,
    /// A reference wrapped in markdown link parentheses: `(prefix/name)`.
    ParenLink,
    /// A reference appearing without surrounding link syntax.
    Bare,
}

/// Normalizes a resource file name.
///
/// Rules, in order:
/// 1. `<stem>.<known ext>` followed by whitespace, `&` or `?` loses everything
///    from that character on.
/// 2. An extension listed in `png_exts` is replaced with `.png`.
/// 3. A name without extension whose stem is a 32-character upper-case hex id
///    gets `.png` appended.
///
/// The function is idempotent.
pub fn normalize_resource_name(name: &str, png_exts: &PngExtensions) -> String {
    let mut name = match QUERY_SUFFIX_RE.captures(name) {
        Some(caps) => caps[1].to_string(),
        None => name.to_string(),
    };

    if !png_exts.is_empty()
        && let Some((stem, ext)) = name.rsplit_once('.')
        && !stem.is_empty()
        && png_exts.contains(ext)
    {
        name = format!("{stem}.png");
    }

    if HEX_ID_RE.is_match(&name) {
        name.push_str(".png");
    }

    name
}

/// Applies [`normalize_resource_name`] to every reference that starts with
/// a given prefix inside text, in one [`NameContext`].
///
/// In [`NameContext::ParenLink`] the name runs up to the closing parenthesis,
/// so a trailing `?query` or title inside the parentheses is stripped by rule 1.
/// In [`NameContext::Bare`] the name runs up to the next whitespace or link
/// delimiter. [`NameContext::File`] treats the whole text as one name.
#[derive(Debug, Clone)]
pub struct ReferenceNormalizer {
    prefix: String,
    context: NameContext,
    pattern: Option<Regex>,
}

impl ReferenceNormalizer {
    pub fn new(prefix: &str, context: NameContext) -> Self {
        let escaped = regex::escape(prefix);
        let pattern = match context {
            NameContext::File => None,
            NameContext::ParenLink => Some(format!(r"\({escaped}([^)\n]*)\)")),
            NameContext::Bare => Some(format!(r#"{escaped}([^\s()\[\]<>"']+)"#)),
        };

        Self {
            prefix: prefix.to_string(),
            context,
            pattern: pattern.map(|p| Regex::new(&p).unwrap()),
        }
    }

    pub fn apply(&self, text: &str, png_exts: &PngExtensions) -> String {
        let Some(re) = &self.pattern else {
            return normalize_resource_name(text, png_exts);
        };

        re.replace_all(text, |caps: &Captures| {
            let name = normalize_resource_name(&caps[1], png_exts);
            match self.context {
                NameContext::ParenLink => format!("({}{name})", self.prefix),
                _ => format!("{}{name}", self.prefix),
            }
        })
        .into_owned()
    }
}
