//! Document extraction orchestration.

use log::{debug, warn};

use crate::backend::{PageAccess, PdfBackend};
use crate::error::Result;
use crate::model::{ExtractionMethod, ExtractionResult};
use crate::ocr::OcrEngine;
use crate::reflow::{PageAssembler, ReflowOptions};

/// Runs the full per-document pipeline: per-page reflow, OCR fallback,
/// aggregation, and method classification.
///
/// Pages are processed sequentially in document order; backend page
/// handles are not shared. The document handle is released on drop, on
/// both the success and the failure path.
pub struct DocumentExtractor<'a> {
    options: ReflowOptions,
    assembler: PageAssembler,
    ocr: Option<&'a dyn OcrEngine>,
}

impl<'a> DocumentExtractor<'a> {
    /// Create an extractor without OCR fallback.
    pub fn new(options: ReflowOptions) -> Result<Self> {
        let assembler = PageAssembler::from_options(&options)?;
        Ok(Self {
            options,
            assembler,
            ocr: None,
        })
    }

    /// Attach an OCR engine for short-page fallback.
    pub fn with_ocr(mut self, engine: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Extract a document, converting any fatal error into a structured
    /// failure result. This never returns partial content: a parse failure
    /// or malformed page data yields an empty, `method = error` result.
    pub fn extract(&self, backend: &dyn PdfBackend, bytes: &[u8]) -> ExtractionResult {
        match self.try_extract(backend, bytes) {
            Ok(result) => result,
            Err(e) => {
                log::error!("extraction failed: {e}");
                ExtractionResult::failure(e.to_string())
            }
        }
    }

    fn try_extract(&self, backend: &dyn PdfBackend, bytes: &[u8]) -> Result<ExtractionResult> {
        let document = backend.open(bytes)?;

        let mut pages: Vec<String> = Vec::new();
        let mut ocr_pages = 0usize;

        for index in 0..document.page_count() {
            let page = document.page(index)?;
            let blocks = page.blocks()?;
            let mut text = self.assembler.reflow(&blocks);

            let mut used_ocr = false;
            if self.should_try_ocr(&text) {
                if let Some(ocr_text) = self.run_ocr(page.as_ref(), index) {
                    // Accept OCR output only when it is strictly longer than
                    // the vector text; short pages are often legitimate.
                    if trimmed_chars(&ocr_text) > trimmed_chars(&text) {
                        text = ocr_text;
                        used_ocr = true;
                    }
                }
            }

            // Pages that reflow to nothing are dropped, mirroring the
            // block-level empty-skip at page granularity.
            if !text.is_empty() {
                if used_ocr {
                    ocr_pages += 1;
                }
                debug!(
                    "page {index}: {} chars{}",
                    text.chars().count(),
                    if used_ocr { " (ocr)" } else { "" }
                );
                pages.push(text);
            }
        }

        let method = if ocr_pages == 0 {
            ExtractionMethod::Text
        } else if ocr_pages == pages.len() {
            ExtractionMethod::Ocr
        } else {
            ExtractionMethod::Mixed
        };

        Ok(ExtractionResult::success(pages, method))
    }

    fn should_try_ocr(&self, vector_text: &str) -> bool {
        self.ocr.is_some() && trimmed_chars(vector_text) < self.options.ocr_trigger_chars
    }

    /// Render the page and run OCR, normalizing the raw output with the
    /// same cleanup steps as vector text. Best-effort: any failure logs a
    /// warning and yields `None`.
    fn run_ocr(&self, page: &dyn PageAccess, index: u32) -> Option<String> {
        let engine = self.ocr?;

        let image = match page.render(self.options.ocr_render_scale) {
            Ok(image) => image,
            Err(e) => {
                warn!("OCR skipped for page {index}: {e}");
                return None;
            }
        };

        match engine.recognize(&image, &self.options.ocr_languages) {
            Ok(raw) => Some(self.assembler.normalize_raw(&raw)),
            Err(e) => {
                warn!("OCR failed for page {index}: {e}");
                None
            }
        }
    }
}

/// Character count of the trimmed text, in Unicode scalar values.
fn trimmed_chars(text: &str) -> usize {
    text.trim().chars().count()
}
