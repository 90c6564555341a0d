//! Page-level reflow assembly.

use crate::error::Result;
use crate::model::TextBlock;

use super::{BlockNormalizer, NoiseFilter, ReflowOptions};

/// Assembles a page's ordered blocks into reflowed paragraph text.
///
/// Block order is the backend's reading order and is never changed here;
/// the assembler only filters and normalizes.
pub struct PageAssembler {
    noise: NoiseFilter,
    normalizer: BlockNormalizer,
}

impl PageAssembler {
    /// Create an assembler from reflow options.
    pub fn from_options(options: &ReflowOptions) -> Result<Self> {
        let noise = match &options.noise_patterns {
            Some(patterns) => NoiseFilter::with_patterns(patterns)?,
            None => NoiseFilter::new(),
        };
        Ok(Self {
            noise,
            normalizer: BlockNormalizer::new(options.normalize_unicode),
        })
    }

    /// Reflow one page.
    ///
    /// Non-text blocks and noise blocks are skipped, survivors are
    /// normalized, empty results are dropped, and the rest are joined with
    /// a blank line to keep paragraph boundaries at block granularity.
    /// An empty string is a valid result when every block was filtered.
    pub fn reflow(&self, blocks: &[TextBlock]) -> String {
        let mut paragraphs: Vec<String> = Vec::new();

        for block in blocks {
            if !block.is_text() {
                continue;
            }
            if self.noise.is_noise(&block.text) {
                continue;
            }
            let cleaned = self.normalizer.normalize(&block.text);
            if !cleaned.is_empty() {
                paragraphs.push(cleaned);
            }
        }

        paragraphs.join("\n\n")
    }

    /// Normalize raw OCR output with the same block cleanup steps.
    pub fn normalize_raw(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self {
            noise: NoiseFilter::new(),
            normalizer: BlockNormalizer::default(),
        }
    }
}
