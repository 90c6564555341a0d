//! Error types for the pdfreflow library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The input byte buffer is empty.
    #[error("Empty input: document buffer has zero length")]
    EmptyInput,

    /// A base64 payload could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// A user-supplied noise pattern failed to compile.
    #[error("Invalid noise pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern source
        pattern: String,
        /// Compiler diagnostic
        message: String,
    },

    /// The document bytes could not be opened or parsed.
    ///
    /// Fatal to the whole extraction request; surfaced to callers as a
    /// failure result, never as a partial one.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// The backend returned malformed block data for a page.
    ///
    /// Indicates an upstream contract violation, so it propagates like
    /// [`Error::Parse`] rather than being recovered per page.
    #[error("Page processing error on page {page}: {message}")]
    PageProcessing {
        /// Zero-based page index
        page: u32,
        /// What went wrong
        message: String,
    },

    /// OCR rendering or recognition failed.
    ///
    /// Recovered locally: the page keeps its vector text and the failure
    /// is logged as a warning.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The PDF backend library could not be loaded or bound.
    #[error("Backend unavailable: {0}")]
    Backend(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),
}

impl Error {
    /// True for errors that abort the whole extraction request.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Ocr(_))
    }
}
