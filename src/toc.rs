//! The indented TOC text convention.
//!
//! One entry per line: optional leading whitespace, title tokens, then a
//! 1-based page number as the last token. Nesting is not encoded as a fixed
//! unit; it is inferred from relative indent sizes:
//!
//! ```text
//! Chapter 1          1
//!   Section 1.1      2
//!     Subsection     3
//! Chapter 2          9
//! ```
//!
//! On output the convention is normalized to two spaces per level with the
//! page number column-aligned past the longest indented title.

use crate::error::{OutlineError, Result};
use crate::tree::FlatEntry;

/// A successfully parsed TOC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocLine {
    /// Number of leading whitespace characters.
    pub indent: usize,
    /// Title tokens rejoined with single spaces.
    pub title: String,
    /// 0-based page index (the file stores 1-based numbers).
    pub page: i64,
}

/// Parse one line of TOC text.
///
/// Returns `Ok(None)` for lines with fewer than two whitespace-separated
/// tokens (blank or malformed lines are tolerated by skipping them). A last
/// token that is not an integer is an error.
pub fn parse_line(line: &str) -> Result<Option<TocLine>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Ok(None);
    }

    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    let title = tokens[..tokens.len() - 1].join(" ");
    let page = tokens[tokens.len() - 1]
        .parse::<i64>()
        .ok()
        .and_then(|p| p.checked_sub(1))
        .ok_or_else(|| OutlineError::InvalidPage {
            line: line.trim_end().to_string(),
        })?;

    Ok(Some(TocLine {
        indent,
        title,
        page,
    }))
}

/// Resolves each TOC line's parent from relative indent sizes.
///
/// The parent of a line is the nearest preceding line with a strictly
/// smaller indent. Kept as a pruned stack of open ancestors rather than the
/// full line history: pushing an indent pops every tail entry at that indent
/// or deeper, so the stack stays strictly increasing and resolution never
/// re-scans closed subtrees. A line at indent 0 is always a root; so is a
/// line with no smaller-indented ancestor at all.
#[derive(Debug, Default)]
pub struct ParentResolver<H> {
    ancestors: Vec<(usize, H)>,
}

impl<H: Copy> ParentResolver<H> {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            ancestors: Vec::new(),
        }
    }

    /// Resolve the parent handle for a line at `indent`.
    ///
    /// `None` means the entry is a root. Equal indent is never a parent.
    pub fn resolve(&self, indent: usize) -> Option<H> {
        if indent == 0 {
            return None;
        }
        self.ancestors
            .iter()
            .rev()
            .find(|(i, _)| *i < indent)
            .map(|(_, handle)| *handle)
    }

    /// Record an accepted line and the handle its entry was given.
    ///
    /// Must be called after `resolve` for the same line.
    pub fn push(&mut self, indent: usize, handle: H) {
        while self
            .ancestors
            .last()
            .is_some_and(|(i, _)| *i >= indent)
        {
            self.ancestors.pop();
        }
        self.ancestors.push((indent, handle));
    }
}

/// Render flattened outline records as TOC text.
///
/// Each line is `2 * level` spaces, the title, padding spaces, then the
/// 0-based page number. Padding aligns every page number to one column past
/// the longest indented title. Returns `None` for an empty record list,
/// where the column width is undefined.
pub fn render_toc(entries: &[FlatEntry]) -> Option<String> {
    let max_length = entries
        .iter()
        .map(|e| e.title.chars().count() + 2 * e.level)
        .max()?
        + 1;

    let mut out = String::new();
    for entry in entries {
        let indent = 2 * entry.level;
        let padding = max_length - indent - entry.title.chars().count();
        out.push_str(&" ".repeat(indent));
        out.push_str(&entry.title);
        out.push_str(&" ".repeat(padding));
        out.push_str(&entry.page.to_string());
        out.push('\n');
    }
    Some(out)
}
