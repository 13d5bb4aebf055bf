//! Text-based PDF input.

use tracing::{debug, warn};

use super::TextSource;
use crate::error::SourceError;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Reads the embedded text layer of a PDF.
#[derive(Debug, Clone, Copy)]
pub struct PdfTextSource {
    min_text_chars: usize,
}

impl PdfTextSource {
    pub fn new() -> Self {
        Self { min_text_chars: 50 }
    }

    /// Set the minimum amount of embedded text to accept.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String, SourceError> {
        let mut extractor = PdfExtractor::new().with_min_text_chars(self.min_text_chars);
        extractor.load(data)?;

        let content = extractor.extract_all()?;
        let chars = content.text.trim().chars().count();
        if !content.pdf_type.has_text() {
            warn!(
                "PDF has {} characters of text and {} images; OCR required",
                chars, content.image_count
            );
            return Err(SourceError::NoExtractableText {
                chars,
                required: self.min_text_chars,
            });
        }

        debug!("Extracted {} characters from {} PDF pages", chars, content.page_count);
        Ok(content.text)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}
