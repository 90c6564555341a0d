//! Block-level text normalization.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Collapses a single block's raw text into one whitespace-normalized line.
///
/// A block is one logical unit (usually a paragraph or sentence fragment),
/// so its embedded line breaks are line-wrap artifacts, not paragraph
/// boundaries — paragraph boundaries are block boundaries by construction.
pub struct BlockNormalizer {
    hyphen_break: Regex,
    whitespace_run: Regex,
    nfc: bool,
}

impl BlockNormalizer {
    /// Create a normalizer. `nfc` enables a Unicode NFC pre-pass.
    pub fn new(nfc: bool) -> Self {
        Self {
            hyphen_break: Regex::new(r"(\w)-\s*\n\s*(\w)").expect("valid built-in pattern"),
            whitespace_run: Regex::new(r"\s+").expect("valid built-in pattern"),
            nfc,
        }
    }

    /// Normalize one block's raw text.
    ///
    /// Steps, in this order (de-hyphenation must see the line break before
    /// it is collapsed to a space):
    /// 1. rejoin words hyphenated across a line break ("develop-\nment" →
    ///    "development"); the hyphen is always dropped, even for compounds
    ///    that may have been intentional
    /// 2. replace remaining line breaks with single spaces
    /// 3. collapse whitespace runs to single spaces
    /// 4. trim
    ///
    /// Empty or all-whitespace input returns an empty string, signalling
    /// the caller to drop the block.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let text = if self.nfc {
            raw.nfc().collect::<String>()
        } else {
            raw.to_string()
        };

        let text = self.hyphen_break.replace_all(&text, "$1$2");
        let text = text.replace('\n', " ");
        let text = self.whitespace_run.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for BlockNormalizer {
    fn default() -> Self {
        Self::new(false)
    }
}
