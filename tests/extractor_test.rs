//! Integration tests for the document extraction orchestrator, driven by
//! mock backend and OCR implementations.

use std::cell::RefCell;
use std::collections::VecDeque;

use pdfreflow::backend::{DocumentAccess, PageAccess, PageImage, PdfBackend};
use pdfreflow::ocr::OcrEngine;
use pdfreflow::{
    BoundingBox, DocumentExtractor, Error, ExtractionMethod, ReflowOptions, Result, TextBlock,
};

/// Mock PDF backend serving a fixed set of pages.
struct MockPdf {
    pages: Vec<Vec<TextBlock>>,
    fail_open: Option<String>,
    fail_blocks_on: Option<u32>,
}

impl MockPdf {
    fn with_pages(pages: Vec<Vec<TextBlock>>) -> Self {
        Self {
            pages,
            fail_open: None,
            fail_blocks_on: None,
        }
    }

    fn failing_open(message: &str) -> Self {
        Self {
            pages: Vec::new(),
            fail_open: Some(message.to_string()),
            fail_blocks_on: None,
        }
    }
}

impl PdfBackend for MockPdf {
    fn open<'a>(&'a self, _bytes: &'a [u8]) -> Result<Box<dyn DocumentAccess + 'a>> {
        if let Some(message) = &self.fail_open {
            return Err(Error::Parse(message.clone()));
        }
        Ok(Box::new(MockDocument {
            pages: &self.pages,
            fail_blocks_on: self.fail_blocks_on,
        }))
    }
}

struct MockDocument<'a> {
    pages: &'a [Vec<TextBlock>],
    fail_blocks_on: Option<u32>,
}

impl DocumentAccess for MockDocument<'_> {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, index: u32) -> Result<Box<dyn PageAccess + '_>> {
        let blocks = self
            .pages
            .get(index as usize)
            .ok_or(Error::PageOutOfRange(index, self.page_count()))?;
        Ok(Box::new(MockPage {
            blocks,
            fail_blocks: self.fail_blocks_on == Some(index),
            index,
        }))
    }
}

struct MockPage<'a> {
    blocks: &'a [TextBlock],
    fail_blocks: bool,
    index: u32,
}

impl PageAccess for MockPage<'_> {
    fn blocks(&self) -> Result<Vec<TextBlock>> {
        if self.fail_blocks {
            return Err(Error::PageProcessing {
                page: self.index,
                message: "malformed block tuple".to_string(),
            });
        }
        Ok(self.blocks.to_vec())
    }

    fn render(&self, _scale: f32) -> Result<PageImage> {
        Ok(PageImage::new_rgb8(1, 1))
    }
}

/// OCR engine replaying a scripted response per triggered page.
struct ScriptedOcr {
    responses: RefCell<VecDeque<Result<String>>>,
}

impl ScriptedOcr {
    fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
        }
    }
}

impl OcrEngine for ScriptedOcr {
    fn recognize(&self, _image: &PageImage, _languages: &[String]) -> Result<String> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Ocr("no scripted response".to_string())))
    }
}

fn text_block(text: &str) -> TextBlock {
    TextBlock::text(BoundingBox::default(), text)
}

fn long_page() -> Vec<TextBlock> {
    vec![text_block(
        "A full paragraph of vector text that is comfortably longer than the \
         fifty character OCR trigger threshold.",
    )]
}

fn extractor<'a>(options: ReflowOptions) -> DocumentExtractor<'a> {
    DocumentExtractor::new(options).unwrap()
}

#[test]
fn test_method_text_when_no_page_uses_ocr() {
    let pdf = MockPdf::with_pages(vec![long_page(), long_page(), long_page()]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Text);
    assert_eq!(result.page_count, 3);
}

#[test]
fn test_method_mixed_when_one_page_uses_ocr() {
    let pdf = MockPdf::with_pages(vec![long_page(), long_page(), vec![text_block("Tiny.")]]);
    let ocr = ScriptedOcr::new(vec![Ok(
        "Recognized page text that is clearly longer than the vector text.".to_string(),
    )]);
    let result = extractor(ReflowOptions::default())
        .with_ocr(&ocr)
        .extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Mixed);
    assert_eq!(result.page_count, 3);
    assert!(result.pages[2].starts_with("Recognized page text"));
}

#[test]
fn test_method_ocr_when_all_pages_use_ocr() {
    let pdf = MockPdf::with_pages(vec![
        vec![text_block("a")],
        vec![text_block("b")],
        vec![text_block("c")],
    ]);
    let ocr = ScriptedOcr::new(vec![
        Ok("First recognized page.".to_string()),
        Ok("Second recognized page.".to_string()),
        Ok("Third recognized page.".to_string()),
    ]);
    let result = extractor(ReflowOptions::default())
        .with_ocr(&ocr)
        .extract(&pdf, b"%PDF-");

    assert_eq!(result.method, ExtractionMethod::Ocr);
    assert_eq!(result.page_count, 3);
}

#[test]
fn test_ocr_substitution_guard_rejects_shorter_output() {
    // Vector text of 40 chars triggers OCR (below 50) but a 35-char OCR
    // result must be rejected.
    let pdf = MockPdf::with_pages(vec![vec![text_block(&"a".repeat(40))]]);
    let ocr = ScriptedOcr::new(vec![Ok("b".repeat(35))]);
    let result = extractor(ReflowOptions::default())
        .with_ocr(&ocr)
        .extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Text);
    assert_eq!(result.pages[0], "a".repeat(40));
}

#[test]
fn test_ocr_output_is_normalized() {
    let pdf = MockPdf::with_pages(vec![vec![text_block("x")]]);
    let ocr = ScriptedOcr::new(vec![Ok("hyphen-\nated   text\nfrom the scanner ".to_string())]);
    let result = extractor(ReflowOptions::default())
        .with_ocr(&ocr)
        .extract(&pdf, b"%PDF-");

    assert_eq!(result.pages[0], "hyphenated text from the scanner");
    assert_eq!(result.method, ExtractionMethod::Ocr);
}

#[test]
fn test_ocr_failure_keeps_vector_text() {
    let pdf = MockPdf::with_pages(vec![vec![text_block("Short but real.")]]);
    let ocr = ScriptedOcr::new(vec![Err(Error::Ocr("engine crashed".to_string()))]);
    let result = extractor(ReflowOptions::default())
        .with_ocr(&ocr)
        .extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Text);
    assert_eq!(result.pages[0], "Short but real.");
}

#[test]
fn test_missing_ocr_engine_is_not_an_error() {
    let pdf = MockPdf::with_pages(vec![vec![text_block("Tiny.")]]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Text);
    assert_eq!(result.pages[0], "Tiny.");
}

#[test]
fn test_image_blocks_are_excluded_from_page_text() {
    let pdf = MockPdf::with_pages(vec![vec![
        text_block("A paragraph above the figure, long enough to skip the OCR trigger."),
        TextBlock::image(BoundingBox::new(10.0, 200.0, 200.0, 380.0)),
        text_block("A paragraph below the figure, long enough to skip the OCR trigger."),
    ]]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(
        result.pages[0],
        "A paragraph above the figure, long enough to skip the OCR trigger.\n\n\
         A paragraph below the figure, long enough to skip the OCR trigger."
    );
}

#[test]
fn test_empty_pages_are_dropped() {
    let pdf = MockPdf::with_pages(vec![
        long_page(),
        // Every block filtered: noise + whitespace
        vec![text_block("Page 2 of 3"), text_block("   ")],
        long_page(),
    ]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.page_count, 2);
    assert_eq!(result.pages.len(), 2);
}

#[test]
fn test_page_order_is_document_order() {
    let pdf = MockPdf::with_pages(vec![
        vec![text_block("First page content, long enough to skip the OCR trigger threshold.")],
        vec![text_block("Second page content, long enough to skip the OCR trigger threshold.")],
    ]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.pages[0].starts_with("First"));
    assert!(result.pages[1].starts_with("Second"));
    assert_eq!(
        result.text,
        format!("{}\n\n{}", result.pages[0], result.pages[1])
    );
}

#[test]
fn test_fatal_parse_failure_shape() {
    let pdf = MockPdf::failing_open("bad xref table");
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"not a pdf");

    assert!(!result.success);
    assert_eq!(result.method, ExtractionMethod::Error);
    assert_eq!(result.page_count, 0);
    assert!(result.text.is_empty());
    assert!(result.pages.is_empty());
    assert!(result.error.as_deref().unwrap().contains("bad xref table"));
}

#[test]
fn test_malformed_page_data_fails_whole_request() {
    let mut pdf = MockPdf::with_pages(vec![long_page(), long_page()]);
    pdf.fail_blocks_on = Some(1);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(!result.success);
    assert_eq!(result.method, ExtractionMethod::Error);
    assert!(result.pages.is_empty());
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .contains("malformed block tuple"));
}

#[test]
fn test_zero_retained_pages_classified_as_text() {
    let pdf = MockPdf::with_pages(vec![vec![text_block("Page 1")]]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");

    assert!(result.success);
    assert_eq!(result.method, ExtractionMethod::Text);
    assert_eq!(result.page_count, 0);
    assert!(result.text.is_empty());
}

#[test]
fn test_result_payload_shape() {
    let pdf = MockPdf::with_pages(vec![long_page()]);
    let result = extractor(ReflowOptions::default()).extract(&pdf, b"%PDF-");
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["method"], "text");
    assert_eq!(value["success"], true);
    assert_eq!(value["page_count"], 1);
    assert!(value["error"].is_null());
    assert!(value["pages"].is_array());
}
