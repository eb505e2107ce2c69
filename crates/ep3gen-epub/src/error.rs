//! Error types for EPUB packaging

use thiserror::Error;

/// Errors that can occur while rendering or packaging a book
#[derive(Error, Debug)]
pub enum EpubError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A generated or copied file is not well-formed XML
    #[error("XML error in {path}: {source}")]
    Xml {
        path: String,
        #[source]
        source: quick_xml::Error,
    },

    /// A file the package needs was never supplied
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// The same page was emitted twice
    #[error("Page already generated: {0}")]
    DuplicatePage(String),
}

/// Result type for EPUB operations
pub type Result<T> = std::result::Result<T, EpubError>;
