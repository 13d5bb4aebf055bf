//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// A text-based PDF has more embedded characters than this by default.
const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_chars: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Extracted text (may be empty for scanned documents).
    pub text: String,
    /// Number of pages.
    pub page_count: u32,
    /// Number of embedded image objects.
    pub image_count: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }

    /// Set the character count a text-based PDF must exceed.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Extract text and classify the loaded document in one pass.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let text = self.extract_text()?;
        let image_count = self.count_images();
        let pdf_type = classify(text.trim().chars().count(), image_count, self.min_text_chars);

        debug!(
            "PDF analysis: {} pages, {} chars text, {} images -> {:?}",
            page_count,
            text.len(),
            image_count,
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            page_count,
            image_count,
        })
    }

    /// Count image XObjects anywhere in the document.
    fn count_images(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        let count = doc
            .objects
            .values()
            .filter(|object| is_image_object(object))
            .count();

        trace!("Found {} image objects", count);
        count
    }
}

fn is_image_object(object: &Object) -> bool {
    let Object::Stream(stream) = object else {
        return false;
    };

    stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|subtype| subtype.as_name().ok())
        .is_some_and(|name| name == b"Image")
}

fn classify(text_chars: usize, image_count: usize, min_text_chars: usize) -> PdfType {
    let has_text = text_chars > min_text_chars;
    let has_images = image_count > 0;

    match (has_text, has_images) {
        (true, false) => PdfType::Text,
        (false, true) => PdfType::Image,
        (true, true) => PdfType::Hybrid,
        (false, false) => PdfType::Empty,
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        classify(text.trim().chars().count(), self.count_images(), self.min_text_chars)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.analyze(), PdfType::Empty);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_all(), Err(PdfError::NoPages)));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(120, 0, 50), PdfType::Text);
        assert_eq!(classify(10, 2, 50), PdfType::Image);
        assert_eq!(classify(80, 1, 50), PdfType::Hybrid);
        assert_eq!(classify(0, 0, 50), PdfType::Empty);
        assert_eq!(classify(20, 0, 10), PdfType::Text);
    }

    #[test]
    fn test_classify_needs_more_than_threshold() {
        assert_eq!(classify(50, 0, 50), PdfType::Empty);
        assert_eq!(classify(51, 0, 50), PdfType::Text);
        assert_eq!(classify(50, 1, 50), PdfType::Image);
    }

    #[test]
    fn test_non_stream_is_not_image() {
        assert!(!is_image_object(&Object::Null));
        assert!(!is_image_object(&Object::Integer(3)));
    }
}
