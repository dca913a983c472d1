//! PDF Outliner - bidirectional PDF outline / TOC text conversion.
//!
//! Converts between the nested outline (bookmark) tree stored in a PDF and
//! a flat, indentation-encoded plain-text table of contents:
//!
//! ```text
//! Chapter 1            1
//!   Section 1.1        2
//!     Subsection       3
//! Chapter 2            9
//! ```
//!
//! **Import** reads such a file, infers each entry's parent from relative
//! indent sizes, validates every page against the document (after an
//! integer offset correcting for front matter), and writes the result as a
//! new PDF next to the source. **Export** flattens an existing outline and
//! renders it back in the same convention, normalized to two spaces per
//! level with column-aligned page numbers.
//!
//! # Quick Start
//!
//! ```no_run
//! use pdf_outliner::{export::export_outline, import::add_toc_outline};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     // book-new.pdf appears next to book.pdf
//!     let message = add_toc_outline(Path::new("book.pdf"), Path::new("toc.txt"), 0)?;
//!     println!("{message}");
//!
//!     let message = export_outline(Path::new("book.pdf"), Path::new("out.txt"))?;
//!     println!("{message}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **tree**: the outline node model and depth-first flattening
//! - **toc**: the indentation text convention (parsing, parent resolution,
//!   column-aligned rendering)
//! - **document**: capability traits separating the algorithms from the
//!   PDF backing
//! - **pdf**: the `lopdf` implementation of those capabilities
//! - **import** / **export**: the two one-pass operations

pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod pdf;
pub mod toc;
pub mod tree;

// Re-export commonly used types
pub use document::{OutlineSink, OutlineSource, derived_output_path};
pub use error::{OutlineError, Result};
pub use export::export_outline;
pub use import::{add_toc_outline, import_entries};
pub use pdf::{BookmarkId, PdfDocument, PdfWriter};
pub use toc::{ParentResolver, TocLine, parse_line, render_toc};
pub use tree::{FlatEntry, OutlineNode, flatten_outline};
