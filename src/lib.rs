//! # pdfreflow
//!
//! Block-based PDF text reflow and cleanup for embedding pipelines.
//!
//! PDFs store text as positioned glyph runs grouped into blocks; naive
//! extraction yields text fragmented by mid-sentence line breaks,
//! hyphenation artifacts, and repeated header/footer noise. This library
//! reflows each page at block granularity — de-hyphenating, collapsing
//! line-wrap breaks, and filtering noise blocks — and falls back to OCR
//! for pages with too little vector text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::extract_file;
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!     println!("{} pages via {}", result.page_count, result.method);
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reading-order reflow**: paragraph boundaries preserved at block
//!   granularity, sentence-coherent output
//! - **Noise filtering**: data-driven header/footer signatures
//! - **OCR fallback**: short pages re-run through Tesseract with a
//!   substitution guard (feature `tesseract`)
//! - **Pluggable backend**: pdfium by default (feature `pdfium`), or any
//!   [`backend::PdfBackend`] implementation

pub mod backend;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod ocr;
pub mod reflow;

// Re-export commonly used types
pub use detect::{decode_payload, is_pdf, is_pdf_bytes, Payload};
pub use error::{Error, Result};
pub use extract::DocumentExtractor;
pub use model::{BlockKind, BoundingBox, ExtractionMethod, ExtractionResult, TextBlock};
pub use reflow::{BlockNormalizer, NoiseFilter, PageAssembler, ReflowOptions};

use crate::backend::PdfBackend;
use crate::ocr::OcrEngine;

/// Extract reflowed text from a PDF file using the default backend.
///
/// # Example
///
/// ```no_run
/// let result = pdfreflow::extract_file("document.pdf").unwrap();
/// assert!(result.success);
/// ```
#[cfg(feature = "pdfium")]
pub fn extract_file<P: AsRef<std::path::Path>>(path: P) -> Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    extract_bytes(&data)
}

/// Extract reflowed text from PDF bytes using the default backend.
///
/// Returns `Err` only for configuration or backend-binding problems;
/// document-level failures (unparsable bytes) come back as a structured
/// [`ExtractionResult`] with `success == false`.
#[cfg(feature = "pdfium")]
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    Extractor::new().extract_bytes(data)
}

/// Builder for configuring and running extractions.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::Extractor;
///
/// let result = Extractor::new()
///     .with_ocr_trigger_chars(80)
///     .with_ocr_languages(["eng"])
///     .extract_bytes(&std::fs::read("document.pdf").unwrap())?;
/// # Ok::<(), pdfreflow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ReflowOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self {
            options: ReflowOptions::default(),
        }
    }

    /// Replace the whole option set.
    pub fn with_options(mut self, options: ReflowOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the OCR trigger threshold in characters.
    pub fn with_ocr_trigger_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_ocr_trigger_chars(chars);
        self
    }

    /// Set the OCR language list.
    pub fn with_ocr_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_ocr_languages(languages);
        self
    }

    /// Replace the header/footer noise pattern list.
    pub fn with_noise_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_noise_patterns(patterns);
        self
    }

    /// Enable Unicode NFC normalization of block text.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.options = self.options.with_unicode_normalization(enabled);
        self
    }

    /// Run extraction against an explicit backend and optional OCR engine.
    pub fn extract_with(
        &self,
        pdf: &dyn PdfBackend,
        ocr: Option<&dyn OcrEngine>,
        data: &[u8],
    ) -> Result<ExtractionResult> {
        let mut extractor = DocumentExtractor::new(self.options.clone())?;
        if let Some(engine) = ocr {
            extractor = extractor.with_ocr(engine);
        }
        Ok(extractor.extract(pdf, data))
    }

    /// Run extraction with the pdfium backend (and Tesseract OCR when the
    /// `tesseract` feature is enabled and the runtime is available).
    #[cfg(feature = "pdfium")]
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ExtractionResult> {
        let pdf = backend::PdfiumBackend::new()?;

        #[cfg(feature = "tesseract")]
        {
            let engine = ocr::TesseractOcr::new();
            return self.extract_with(&pdf, engine.as_ref().map(|e| e as &dyn OcrEngine), data);
        }

        #[cfg(not(feature = "tesseract"))]
        self.extract_with(&pdf, None, data)
    }

    /// Run extraction on a file with the pdfium backend.
    #[cfg(feature = "pdfium")]
    pub fn extract_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<ExtractionResult> {
        let data = std::fs::read(path)?;
        self.extract_bytes(&data)
    }
}
