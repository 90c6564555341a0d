//! Document-level extraction result.

use serde::{Deserialize, Serialize};

/// How the text of a document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Every retained page came from vector text
    Text,
    /// Every retained page came from accepted OCR output
    Ocr,
    /// Some pages used vector text, some used OCR
    Mixed,
    /// Extraction failed; no pages were produced
    Error,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExtractionMethod::Text => "text",
            ExtractionMethod::Ocr => "ocr",
            ExtractionMethod::Mixed => "mixed",
            ExtractionMethod::Error => "error",
        };
        f.write_str(s)
    }
}

/// The sole externally observable output of an extraction request.
///
/// Invariants, enforced by the constructors:
/// - `method == Error` iff `success == false`
/// - `page_count == pages.len()`
/// - `text` equals the pages joined with a blank-line separator, trimmed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Full concatenated document text
    pub text: String,
    /// Per-page reflowed texts, document order, empty pages dropped
    pub pages: Vec<String>,
    /// Number of retained pages
    pub page_count: usize,
    /// Overall extraction method classification
    pub method: ExtractionMethod,
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable message when `success` is false
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Build a successful result from retained page texts.
    pub fn success(pages: Vec<String>, method: ExtractionMethod) -> Self {
        debug_assert!(method != ExtractionMethod::Error);
        let text = pages.join("\n\n").trim().to_string();
        Self {
            text,
            page_count: pages.len(),
            pages,
            method,
            success: true,
            error: None,
        }
    }

    /// Build a failure result carrying a message and no partial content.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            pages: Vec::new(),
            page_count: 0,
            method: ExtractionMethod::Error,
            success: false,
            error: Some(message.into()),
        }
    }
}
