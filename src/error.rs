//! Error types for the outline converter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur while importing or exporting outlines.
#[derive(Error, Debug)]
pub enum OutlineError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source PDF does not exist.
    #[error("No such file: {0}")]
    DocumentNotFound(PathBuf),

    /// The TOC text file does not exist.
    #[error("No such file: {0}")]
    TocNotFound(PathBuf),

    /// A resolved page index falls outside the document.
    #[error("page index out of range: {page} >= {total}")]
    PageOutOfRange { page: i64, total: usize },

    /// A TOC line whose last token is not a page number.
    #[error("invalid page number in line: '{line}'")]
    InvalidPage { line: String },

    /// The document has no outline entries to export.
    #[error("Document '{0}' has no outline entries")]
    EmptyOutline(PathBuf),

    /// Error from the underlying PDF library.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl OutlineError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
