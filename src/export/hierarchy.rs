//! Depth-first walk of the declared notebook hierarchy.
//!
//! Every declared id is looked up among the notebooks found on disk. Ids
//! without an on-disk notebook are reported and their whole declared subtree
//! is skipped. An id that reappears in its own ancestor chain is a cycle and
//! aborts the walk.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use super::ExportError;
use crate::domain::{Library, LibraryMeta, Notebook, NotebookId};

/// A recoverable problem found while walking the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyWarning {
    /// The declared id with no notebook on disk.
    pub notebook_id: NotebookId,
    /// Number of declared descendants skipped along with it.
    pub skipped_descendants: usize,
}

impl fmt::Display for HierarchyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "declared notebook {} not found on disk",
            self.notebook_id
        )?;
        if self.skipped_descendants > 0 {
            write!(
                f,
                "; skipping {} declared descendant(s)",
                self.skipped_descendants
            )?;
        }
        Ok(())
    }
}

/// A notebook reached by the walk, with its ancestors ordered root-to-parent.
#[derive(Debug, Clone)]
pub struct WalkedNotebook<'a> {
    pub notebook: &'a Notebook,
    pub ancestors: Vec<&'a Notebook>,
}

/// Walks `library.meta` in pre-order, calling `on_visit` for every declared
/// notebook that exists on disk.
///
/// The ancestor slice passed to a child is its parent's ancestors followed by
/// the parent. The root node itself is never visited.
///
/// # Errors
///
/// Returns `ExportError::HierarchyCycle` when a node id already appears in
/// its own ancestor chain (the root id included).
pub fn walk<'a, F>(
    library: &'a Library,
    mut on_visit: F,
) -> Result<Vec<HierarchyWarning>, ExportError>
where
    F: FnMut(&'a Notebook, &[&'a Notebook]),
{
    let mut walker = Walker {
        library,
        chain: vec![&library.meta.id],
        ancestors: Vec::new(),
        warnings: Vec::new(),
    };
    for child in &library.meta.children {
        walker.visit(child, &mut on_visit)?;
    }
    Ok(walker.warnings)
}

/// Convenience wrapper around [`walk`] that collects every visit.
pub fn collect_walk(
    library: &Library,
) -> Result<(Vec<WalkedNotebook<'_>>, Vec<HierarchyWarning>), ExportError> {
    let mut walked = Vec::new();
    let warnings = walk(library, |notebook, ancestors| {
        walked.push(WalkedNotebook {
            notebook,
            ancestors: ancestors.to_vec(),
        });
    })?;
    Ok((walked, warnings))
}

struct Walker<'a> {
    library: &'a Library,
    /// Ids from the root down to the node being visited.
    chain: Vec<&'a NotebookId>,
    ancestors: Vec<&'a Notebook>,
    warnings: Vec<HierarchyWarning>,
}

impl<'a> Walker<'a> {
    fn visit<F>(&mut self, node: &'a LibraryMeta, on_visit: &mut F) -> Result<(), ExportError>
    where
        F: FnMut(&'a Notebook, &[&'a Notebook]),
    {
        if self.chain.contains(&&node.id) {
            return Err(ExportError::HierarchyCycle {
                id: node.id.clone(),
            });
        }

        let Some(notebook) = self.library.notebook(&node.id) else {
            let warning = HierarchyWarning {
                notebook_id: node.id.clone(),
                skipped_descendants: count_descendants(node),
            };
            warn!("{warning}");
            self.warnings.push(warning);
            return Ok(());
        };

        on_visit(notebook, &self.ancestors);

        self.chain.push(&node.id);
        self.ancestors.push(notebook);
        let result = node
            .children
            .iter()
            .try_for_each(|child| self.visit(child, on_visit));
        self.ancestors.pop();
        self.chain.pop();
        result
    }
}

fn count_descendants(node: &LibraryMeta) -> usize {
    node.children
        .iter()
        .map(|child| 1 + count_descendants(child))
        .sum()
}
