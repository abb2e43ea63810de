//! Deterministic numeric suffixing for names that collide within one scope.

use super::ExportError;

/// Upper bound on suffix attempts before giving up.
pub const MAX_RENAME_ATTEMPTS: u32 = 100;

/// Returns a name not present in `used`.
///
/// Names are compared ignoring case, since exports commonly land on
/// case-insensitive volumes where `Plan.md` and `plan.md` are one file.
/// The returned name keeps the case of `candidate`.
///
/// If `candidate` is free it is returned unchanged. Otherwise `" {n}"` is
/// appended with `n` starting at `start_suffix` and counting up, so a start
/// of 2 turns the first collision of `Name` into `Name 2`.
///
/// # Errors
///
/// Returns `ExportError::RenameExhausted` once [`MAX_RENAME_ATTEMPTS`]
/// suffixes have all been taken.
pub fn resolve<S: AsRef<str>>(
    candidate: &str,
    used: &[S],
    start_suffix: u32,
) -> Result<String, ExportError> {
    resolve_with(candidate, used, start_suffix, |n| format!("{candidate} {n}"))
}

/// Like [`resolve`], but keeps the extension of a file name in place:
/// `img.png` becomes `img 2.png`.
pub fn resolve_file_name<S: AsRef<str>>(
    candidate: &str,
    used: &[S],
    start_suffix: u32,
) -> Result<String, ExportError> {
    let (stem, ext) = split_extension(candidate);
    resolve_with(candidate, used, start_suffix, |n| format!("{stem} {n}{ext}"))
}

fn resolve_with<S, F>(
    candidate: &str,
    used: &[S],
    start_suffix: u32,
    suffixed: F,
) -> Result<String, ExportError>
where
    S: AsRef<str>,
    F: Fn(u32) -> String,
{
    let taken = |name: &str| {
        let name = name.to_lowercase();
        used.iter().any(|u| u.as_ref().to_lowercase() == name)
    };

    if !taken(candidate) {
        return Ok(candidate.to_string());
    }

    for n in (start_suffix..).take(MAX_RENAME_ATTEMPTS as usize) {
        let name = suffixed(n);
        if !taken(&name) {
            return Ok(name);
        }
    }

    Err(ExportError::RenameExhausted {
        candidate: candidate.to_string(),
        attempts: MAX_RENAME_ATTEMPTS,
    })
}

/// Splits `name` into stem and extension (including the dot).
///
/// Leading dots do not start an extension, so `.hidden` has none.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}
