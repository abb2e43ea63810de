//! Rendering of note content cells to a markdown body.

use super::html::HtmlConverter;
use super::rewrite::ContentRewriter;
use crate::domain::{BrokenLinks, Cell, CellKind, NoteContent};

/// Renders every cell and joins them with blank lines.
///
/// Markdown and rich-text cells go through `rewriter`; code, LaTeX and
/// diagram cells are emitted verbatim inside their block syntax.
pub fn render_body(
    content: &NoteContent,
    converter: &dyn HtmlConverter,
    rewriter: &ContentRewriter<'_>,
    broken: &mut BrokenLinks,
) -> String {
    content
        .cells
        .iter()
        .map(|cell| render_cell(cell, converter, rewriter, broken))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_cell(
    cell: &Cell,
    converter: &dyn HtmlConverter,
    rewriter: &ContentRewriter<'_>,
    broken: &mut BrokenLinks,
) -> String {
    match cell.kind {
        CellKind::Markdown => rewriter.rewrite(cell.payload.trim_end(), broken),
        CellKind::RichText => rewriter.rewrite(&converter.convert(&cell.payload), broken),
        CellKind::Code => fenced(cell.language.as_deref().unwrap_or(""), &cell.payload),
        CellKind::Latex => format!("$$\n{}\n$$", cell.payload.trim_end()),
        CellKind::Diagram => fenced(cell.diagram_kind.as_deref().unwrap_or(""), &cell.payload),
    }
}

/// A fenced block long enough not to be closed by backticks in `body`.
fn fenced(info: &str, body: &str) -> String {
    let longest_run = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{info}\n{}\n{fence}", body.trim_end_matches('\n'))
}
