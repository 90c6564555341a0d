//! Header/footer noise classification.

use regex::Regex;

use crate::error::{Error, Result};

/// Default noise signatures, in evaluation order.
///
/// Each pattern is matched case-insensitively against the trimmed block
/// text, anchored at the start. The list covers bare page-number lines,
/// copyright boilerplate, and URL-only lines.
pub const DEFAULT_NOISE_PATTERNS: &[&str] = &[
    r"^\s*Page\s*\d+\s*(of\s*\d+)?\s*$",
    r"^\s*\d+\s*$",
    r"^\s*-\s*\d+\s*-\s*$",
    r"^\s*\[\s*\d+\s*\]\s*$",
    r"^\s*©.*$",
    r"^\s*All rights reserved.*$",
    r"^\s*Confidential.*$",
    r"^\s*www\..*$",
    r"^\s*http[s]?://.*$",
];

/// Decides whether a block is header/footer noise to exclude from reflow.
///
/// Pure and deterministic. An empty or whitespace-only block is not noise;
/// those are dropped later by the assembler when normalization yields an
/// empty string.
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Create a filter with the built-in pattern list.
    pub fn new() -> Self {
        // The built-in list is known-good; compilation cannot fail.
        let patterns = DEFAULT_NOISE_PATTERNS
            .iter()
            .map(|p| compile_anchored(p).expect("valid built-in pattern"))
            .collect();
        Self { patterns }
    }

    /// Create a filter from a caller-supplied, ordered pattern list.
    ///
    /// Patterns are compiled case-insensitively and anchored at the start
    /// of the block regardless of whether they carry a `^`; a pattern never
    /// degrades to a substring search. Header/footer conventions vary by
    /// corpus, so the list is data-driven.
    pub fn with_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let source = pattern.as_ref();
            let regex = compile_anchored(source).map_err(|e| Error::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// Check whether a block's raw text matches a noise signature.
    pub fn is_noise(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.patterns.iter().any(|p| p.is_match(trimmed))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a pattern case-insensitively, anchored at the start of the
/// input. A leading `^` in the pattern is redundant but harmless.
fn compile_anchored(source: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\A(?:{source})"))
}
