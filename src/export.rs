//! Outline export: a PDF's outline tree into indented TOC text.
//!
//! The tree is flattened depth-first into `(level, page, title)` records,
//! rendered with two spaces per level and a column-aligned page number, and
//! written in a single pass. An existing destination file is overwritten
//! after a warning.

use crate::document::OutlineSource;
use crate::error::{OutlineError, Result};
use crate::pdf::PdfDocument;
use crate::toc::render_toc;
use crate::tree::flatten_outline;
use std::fs;
use std::path::Path;

/// Export `pdf_path`'s outline to `txt_path` as indented TOC text.
pub fn export_outline(pdf_path: &Path, txt_path: &Path) -> Result<String> {
    if !pdf_path.exists() {
        return Err(OutlineError::DocumentNotFound(pdf_path.to_path_buf()));
    }
    if txt_path.exists() {
        println!("Warning: Overwriting {}", txt_path.display());
    }

    let document = PdfDocument::open(pdf_path)?;
    let entries = flatten_outline(&document.outline()?);

    // Render before opening the destination: an empty outline has no
    // defined column width and must not leave a file behind.
    let text = render_toc(&entries)
        .ok_or_else(|| OutlineError::EmptyOutline(pdf_path.to_path_buf()))?;
    fs::write(txt_path, text).map_err(|e| OutlineError::io(txt_path, e))?;

    Ok(format!(
        "The outline has been exported to {}",
        txt_path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::OutlineSink;
    use crate::document::memory::MemoryDocument;
    use crate::import::import_entries;
    use crate::pdf::minimal_document;
    use tempfile::TempDir;

    #[test]
    fn test_export_missing_document() {
        let dir = TempDir::new().unwrap();
        let err = export_outline(
            &dir.path().join("absent.pdf"),
            &dir.path().join("toc.txt"),
        )
        .unwrap_err();
        assert!(matches!(err, OutlineError::DocumentNotFound(_)));
    }

    #[test]
    fn test_export_empty_outline_is_fatal_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let pdf_path = dir.path().join("plain.pdf");
        let txt_path = dir.path().join("toc.txt");

        let mut writer = PdfDocument::from_document(minimal_document(4)).writer();
        writer.save(&pdf_path).unwrap();

        let err = export_outline(&pdf_path, &txt_path).unwrap_err();
        assert!(matches!(err, OutlineError::EmptyOutline(_)));
        assert!(!txt_path.exists());
    }

    #[test]
    fn test_export_writes_aligned_toc() {
        let dir = TempDir::new().unwrap();
        let pdf_path = dir.path().join("book.pdf");
        let txt_path = dir.path().join("toc.txt");

        let source = PdfDocument::from_document(minimal_document(10));
        let mut writer = source.writer();
        let ch1 = writer.add_bookmark("Intro", 0, None);
        writer.add_bookmark("Sub", 1, Some(ch1));
        writer.save(&pdf_path).unwrap();

        let message = export_outline(&pdf_path, &txt_path).unwrap();
        assert!(message.contains("toc.txt"));

        let text = fs::read_to_string(&txt_path).unwrap();
        assert_eq!(text, "Intro 0\n  Sub 1\n");
    }

    #[test]
    fn test_export_overwrites_existing_destination() {
        let dir = TempDir::new().unwrap();
        let pdf_path = dir.path().join("book.pdf");
        let txt_path = dir.path().join("toc.txt");

        let source = PdfDocument::from_document(minimal_document(5));
        let mut writer = source.writer();
        writer.add_bookmark("Chapter 1", 0, None);
        writer.save(&pdf_path).unwrap();

        fs::write(&txt_path, "stale contents\n").unwrap();
        export_outline(&pdf_path, &txt_path).unwrap();

        let text = fs::read_to_string(&txt_path).unwrap();
        assert!(text.starts_with("Chapter 1"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_roundtrip_reconstructs_structure() {
        let mut original = MemoryDocument::new(30);
        let ch1 = original.add_bookmark("Chapter 1", 0, None);
        let s11 = original.add_bookmark("Section 1.1", 2, Some(ch1));
        original.add_bookmark("Subsection 1.1.1", 3, Some(s11));
        original.add_bookmark("Section 1.2", 5, Some(ch1));
        original.add_bookmark("Chapter 2", 10, None);

        let text = render_toc(&flatten_outline(&original.outline().unwrap())).unwrap();

        // Exported text carries the 0-based indices while the import side
        // reads the column as 1-based, so an offset of 1 restores the
        // original pages exactly.
        let mut reimported = MemoryDocument::new(30);
        import_entries(&mut reimported, 30, &text, 1).unwrap();

        assert_eq!(
            reimported.outline().unwrap(),
            original.outline().unwrap()
        );
    }
}
