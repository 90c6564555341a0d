//! OCR engine abstraction.
//!
//! OCR is an optional capability: the extractor runs without an engine and
//! simply keeps vector text. Engine failures are recoverable by design;
//! the fallback decision branches on the `Result` instead of propagating.

use crate::backend::PageImage;
use crate::error::Result;

/// Recognizes text in a rasterized page.
pub trait OcrEngine {
    /// Run recognition with the given language models (e.g. `["eng", "tur"]`),
    /// returning raw, un-normalized text.
    ///
    /// Fails with [`crate::Error::Ocr`] on recognition failure; callers
    /// treat that as "no OCR text available" rather than an error.
    fn recognize(&self, image: &PageImage, languages: &[String]) -> Result<String>;
}

#[cfg(feature = "tesseract")]
mod tesseract;

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractOcr;
