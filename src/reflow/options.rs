//! Reflow and OCR-fallback configuration.

/// Options controlling reflow and the OCR fallback decision.
#[derive(Debug, Clone)]
pub struct ReflowOptions {
    /// Pages whose trimmed reflowed text has fewer characters than this
    /// are candidates for OCR fallback.
    pub ocr_trigger_chars: usize,

    /// Linear scale used when rasterizing a page for OCR.
    pub ocr_render_scale: f32,

    /// Language models requested from the OCR engine.
    pub ocr_languages: Vec<String>,

    /// Apply Unicode NFC normalization before block cleanup.
    pub normalize_unicode: bool,

    /// Custom header/footer patterns; `None` uses the built-in list.
    pub noise_patterns: Option<Vec<String>>,
}

impl ReflowOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OCR trigger threshold in characters.
    pub fn with_ocr_trigger_chars(mut self, chars: usize) -> Self {
        self.ocr_trigger_chars = chars;
        self
    }

    /// Set the OCR render scale.
    pub fn with_ocr_render_scale(mut self, scale: f32) -> Self {
        self.ocr_render_scale = scale;
        self
    }

    /// Set the OCR language list.
    pub fn with_ocr_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ocr_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Enable Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Replace the header/footer pattern list.
    pub fn with_noise_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.noise_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            ocr_trigger_chars: 50,
            ocr_render_scale: 2.0,
            ocr_languages: vec!["eng".to_string(), "tur".to_string()],
            normalize_unicode: false,
            noise_patterns: None,
        }
    }
}
