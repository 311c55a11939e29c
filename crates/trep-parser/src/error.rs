//! Parser error types.

use thiserror::Error;

/// Parser error types.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The POR file (or index file) could not be found or opened.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The file's extension does not map to a known (de)compression
    /// scheme (`.bz2`, `.gz`, `.csv`).
    #[error("unknown file extension: {0}")]
    FileExtensionUnknown(String),

    /// A malformed POR record.
    #[error("malformed POR record on line {line}: {detail}")]
    PorFileParsing { line: usize, detail: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated from trep-core field validation.
    #[error("record validation error: {0}")]
    Core(#[from] trep_core::Error),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;
