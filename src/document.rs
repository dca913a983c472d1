//! Capability seam between the outline algorithms and the document backing.
//!
//! The importer and exporter only need four operations from a document:
//! open it, read its page count and outline, add a bookmark under a parent,
//! and persist the result. Opening and cloning are constructors on the
//! concrete types; the two traits here cover the rest, which keeps the core
//! testable against an in-memory document.

use crate::error::Result;
use crate::tree::OutlineNode;
use std::path::{Path, PathBuf};

/// Read access to an opened document's pages and outline.
pub trait OutlineSource {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// The document's outline as a node sequence.
    fn outline(&self) -> Result<Vec<OutlineNode>>;
}

/// Write access for building a new outline into a document copy.
pub trait OutlineSink {
    /// Opaque handle to an added bookmark, usable as a future parent.
    type Handle: Copy;

    /// Add a bookmark for `page` (0-based) under `parent`, or at the root
    /// when `parent` is `None`. Insertion order is display order.
    fn add_bookmark(&mut self, title: &str, page: usize, parent: Option<Self::Handle>)
        -> Self::Handle;

    /// Persist the document with its accumulated bookmarks.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Derive the output path for an imported document: same directory, same
/// extension, `-new` appended to the stem.
pub fn derived_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let mut name = format!("{stem}-new");
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }

    source.with_file_name(name)
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory document used to test the importer and exporter without
    //! touching a real PDF.

    use super::*;

    #[derive(Debug)]
    struct MemoryBookmark {
        title: String,
        page: usize,
        children: Vec<usize>,
    }

    /// A fake document implementing both capabilities over an arena.
    #[derive(Debug)]
    pub(crate) struct MemoryDocument {
        total_pages: usize,
        bookmarks: Vec<MemoryBookmark>,
        roots: Vec<usize>,
        pub(crate) saved_to: Option<PathBuf>,
    }

    impl MemoryDocument {
        pub(crate) fn new(total_pages: usize) -> Self {
            Self {
                total_pages,
                bookmarks: Vec::new(),
                roots: Vec::new(),
                saved_to: None,
            }
        }

        fn collect(&self, ids: &[usize], out: &mut Vec<OutlineNode>) {
            for &id in ids {
                let bookmark = &self.bookmarks[id];
                out.push(OutlineNode::entry(bookmark.title.clone(), bookmark.page));
                if !bookmark.children.is_empty() {
                    let mut children = Vec::new();
                    self.collect(&bookmark.children, &mut children);
                    out.push(OutlineNode::Group(children));
                }
            }
        }
    }

    impl OutlineSource for MemoryDocument {
        fn page_count(&self) -> usize {
            self.total_pages
        }

        fn outline(&self) -> Result<Vec<OutlineNode>> {
            let mut nodes = Vec::new();
            self.collect(&self.roots, &mut nodes);
            Ok(nodes)
        }
    }

    impl OutlineSink for MemoryDocument {
        type Handle = usize;

        fn add_bookmark(
            &mut self,
            title: &str,
            page: usize,
            parent: Option<usize>,
        ) -> usize {
            let id = self.bookmarks.len();
            self.bookmarks.push(MemoryBookmark {
                title: title.to_string(),
                page,
                children: Vec::new(),
            });
            match parent {
                Some(parent_id) => self.bookmarks[parent_id].children.push(id),
                None => self.roots.push(id),
            }
            id
        }

        fn save(&mut self, path: &Path) -> Result<()> {
            self.saved_to = Some(path.to_path_buf());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryDocument;
    use super::*;
    use crate::tree::flatten_outline;

    #[test]
    fn test_derived_output_path() {
        assert_eq!(
            derived_output_path(Path::new("/docs/book.pdf")),
            PathBuf::from("/docs/book-new.pdf")
        );
        assert_eq!(
            derived_output_path(Path::new("report.pdf")),
            PathBuf::from("report-new.pdf")
        );
    }

    #[test]
    fn test_derived_output_path_without_extension() {
        assert_eq!(
            derived_output_path(Path::new("/docs/book")),
            PathBuf::from("/docs/book-new")
        );
    }

    #[test]
    fn test_memory_document_nesting() {
        let mut doc = MemoryDocument::new(20);
        let ch1 = doc.add_bookmark("Chapter 1", 0, None);
        doc.add_bookmark("Section 1.1", 2, Some(ch1));
        doc.add_bookmark("Chapter 2", 10, None);

        let flat = flatten_outline(&doc.outline().unwrap());
        let view: Vec<(usize, &str, usize)> = flat
            .iter()
            .map(|e| (e.level, e.title.as_str(), e.page))
            .collect();

        assert_eq!(
            view,
            vec![
                (0, "Chapter 1", 0),
                (1, "Section 1.1", 2),
                (0, "Chapter 2", 10)
            ]
        );
    }
}
