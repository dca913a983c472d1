//! Outline import: indented TOC text into a PDF copy.
//!
//! Lines are processed strictly in file order. Each accepted line has its
//! parent resolved from relative indent sizes, its page validated against
//! the document, and a bookmark buffered in the writer. The document is
//! persisted exactly once, after every line succeeded; any failure aborts
//! the pass with nothing written.

use crate::document::{OutlineSink, OutlineSource, derived_output_path};
use crate::error::{OutlineError, Result};
use crate::pdf::PdfDocument;
use crate::toc::{ParentResolver, parse_line};
use std::fs;
use std::path::Path;

/// Feed TOC text into a sink, resolving parents and validating pages.
///
/// `page_offset` is added to every parsed 0-based page before validation
/// and insertion. Returns the number of entries added. The sink is not
/// saved here; the caller persists only after this succeeds.
pub fn import_entries<S: OutlineSink>(
    sink: &mut S,
    total_pages: usize,
    toc_text: &str,
    page_offset: i64,
) -> Result<usize> {
    let mut resolver = ParentResolver::new();
    let mut added = 0;

    for line in toc_text.lines() {
        let Some(toc_line) = parse_line(line)? else {
            continue;
        };

        // An absurd page token can overflow the offset add; that is just
        // another way of being out of range.
        let page = toc_line
            .page
            .checked_add(page_offset)
            .ok_or(OutlineError::PageOutOfRange {
                page: toc_line.page,
                total: total_pages,
            })?;
        if page < 0 || page >= total_pages as i64 {
            return Err(OutlineError::PageOutOfRange {
                page,
                total: total_pages,
            });
        }

        let parent = resolver.resolve(toc_line.indent);
        let handle = sink.add_bookmark(&toc_line.title, page as usize, parent);
        resolver.push(toc_line.indent, handle);
        added += 1;
    }

    Ok(added)
}

/// Import a TOC text file into `pdf_path`, writing the result next to the
/// source as `<stem>-new<ext>`. The source file is never modified.
pub fn add_toc_outline(pdf_path: &Path, toc_path: &Path, page_offset: i64) -> Result<String> {
    if !pdf_path.exists() {
        return Err(OutlineError::DocumentNotFound(pdf_path.to_path_buf()));
    }
    if !toc_path.exists() {
        return Err(OutlineError::TocNotFound(toc_path.to_path_buf()));
    }

    let toc_text = fs::read_to_string(toc_path).map_err(|e| OutlineError::io(toc_path, e))?;
    let document = PdfDocument::open(pdf_path)?;
    let mut writer = document.writer();

    import_entries(&mut writer, document.page_count(), &toc_text, page_offset)?;

    let out_path = derived_output_path(pdf_path);
    writer.save(&out_path)?;

    Ok(format!(
        "The outlines have been added to {}",
        out_path.display()
    ))
}
