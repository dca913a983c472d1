//! Outline tree data model.
//!
//! A PDF outline is a sequence of nodes where a node is either a titled
//! entry pointing at a page, or a bare group whose contents sit one nesting
//! level deeper than the enclosing sequence. A group always follows the
//! entry it belongs under, so `[Entry(A), Group([Entry(B)])]` reads as
//! "B is a child of A".

use serde::{Deserialize, Serialize};

/// A node in the outline structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutlineNode {
    /// A leaf entry: a title pointing at a 0-based page index.
    Entry {
        title: String,
        page: usize,
    },

    /// A deeper nesting level; its contents are children of the
    /// preceding entry.
    Group(Vec<OutlineNode>),
}

impl OutlineNode {
    /// Create a leaf entry.
    pub fn entry(title: impl Into<String>, page: usize) -> Self {
        Self::Entry {
            title: title.into(),
            page,
        }
    }

    /// Count the leaf entries in this subtree.
    pub fn entry_count(&self) -> usize {
        match self {
            Self::Entry { .. } => 1,
            Self::Group(children) => children.iter().map(|n| n.entry_count()).sum(),
        }
    }
}

/// One record of the flattened outline: nesting level, 0-based page, title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Nesting level, 0 for the outermost entries.
    pub level: usize,
    /// 0-based page index.
    pub page: usize,
    /// Entry title.
    pub title: String,
}

/// Flatten an outline sequence into `(level, page, title)` records.
///
/// Traversal is depth-first in native order; entering a group increments
/// the level of everything inside it by one.
pub fn flatten_outline(nodes: &[OutlineNode]) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    flatten_into(nodes, 0, &mut entries);
    entries
}

fn flatten_into(nodes: &[OutlineNode], level: usize, out: &mut Vec<FlatEntry>) {
    for node in nodes {
        match node {
            OutlineNode::Entry { title, page } => out.push(FlatEntry {
                level,
                page: *page,
                title: title.clone(),
            }),
            OutlineNode::Group(children) => flatten_into(children, level + 1, out),
        }
    }
}

/// Count leaf entries across a whole outline.
pub fn entry_count(nodes: &[OutlineNode]) -> usize {
    nodes.iter().map(|n| n.entry_count()).sum()
}

/// Maximum nesting level across a whole outline (0 when flat or empty).
pub fn max_level(nodes: &[OutlineNode]) -> usize {
    flatten_outline(nodes)
        .iter()
        .map(|e| e.level)
        .max()
        .unwrap_or(0)
}

/// Format an outline for terminal display, one indented line per entry.
pub fn format_outline(nodes: &[OutlineNode]) -> String {
    let mut result = String::new();
    for entry in flatten_outline(nodes) {
        result.push_str(&"  ".repeat(entry.level));
        result.push_str(&entry.title);
        result.push_str(&format!(" [page {}]\n", entry.page));
    }
    result
}
