//! Tesseract OCR engine via leptess.

use std::io::Cursor;
use std::sync::OnceLock;

use leptess::LepTess;

use crate::backend::PageImage;
use crate::error::{Error, Result};

use super::OcrEngine;

/// Availability probe, run at most once per process.
static TESSERACT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// OCR engine backed by the Tesseract library.
///
/// `LepTess` instances are not thread-safe, so one is created per
/// recognition call; init cost is small next to recognition itself.
pub struct TesseractOcr;

impl TesseractOcr {
    /// Create the engine if Tesseract and its language data can be loaded.
    ///
    /// Returns `None` when Tesseract is unavailable; absence of OCR is not
    /// an error, pages simply keep their vector text.
    pub fn new() -> Option<Self> {
        if Self::available() {
            Some(Self)
        } else {
            None
        }
    }

    /// Whether the Tesseract runtime can be initialized on this host.
    pub fn available() -> bool {
        *TESSERACT_AVAILABLE.get_or_init(|| match LepTess::new(None, "eng") {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Tesseract unavailable, OCR fallback disabled: {e}");
                false
            }
        })
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &PageImage, languages: &[String]) -> Result<String> {
        let lang = if languages.is_empty() {
            "eng".to_string()
        } else {
            languages.join("+")
        };

        let mut engine = LepTess::new(None, &lang)
            .map_err(|e| Error::Ocr(format!("tesseract init failed for {lang:?}: {e}")))?;

        // leptess reads encoded image bytes, so round-trip through PNG.
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| Error::Ocr(format!("image encode failed: {e}")))?;

        engine
            .set_image_from_mem(&png)
            .map_err(|e| Error::Ocr(format!("set image failed: {e}")))?;

        engine
            .get_utf8_text()
            .map_err(|e| Error::Ocr(format!("recognition failed: {e}")))
    }
}
