//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for document access, isolating the
//! concrete PDF library from the reflow logic. Implementations must return
//! page blocks in reading order (top-to-bottom, left-to-right); the core
//! depends on that ordering for sentence coherence and never re-sorts.

use crate::error::Result;
use crate::model::TextBlock;

/// A rasterized page handed to the OCR engine.
pub type PageImage = image::DynamicImage;

/// One open page of a document.
///
/// Page handles are not assumed thread-safe; callers process pages
/// sequentially and hold at most one handle at a time.
pub trait PageAccess {
    /// Return the page's blocks, reading-order sorted.
    ///
    /// Required capability of any implementation: the returned ordering is
    /// top-to-bottom then left-to-right and stable for identical input.
    fn blocks(&self) -> Result<Vec<TextBlock>>;

    /// Rasterize the page at the given linear scale (1.0 = native size).
    fn render(&self, scale: f32) -> Result<PageImage>;
}

/// An open document handle.
///
/// Resources are released on drop, covering success and failure paths.
pub trait DocumentAccess {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Open page `index` (zero-based).
    fn page(&self, index: u32) -> Result<Box<dyn PageAccess + '_>>;
}

/// Opens documents from raw bytes.
pub trait PdfBackend {
    /// Open a document, failing with [`crate::Error::Parse`] on bytes that
    /// are not a valid document.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn DocumentAccess + 'a>>;
}

#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumBackend;
