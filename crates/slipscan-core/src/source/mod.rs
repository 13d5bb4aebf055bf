//! Text sources turning raw document bytes into receipt text.
//!
//! OCR is out of scope: image inputs are reported as unsupported and
//! callers are expected to run their own recognizer and feed the text in.

mod plain;
#[cfg(feature = "pdf")]
mod pdf;

pub use plain::PlainTextSource;
#[cfg(feature = "pdf")]
pub use pdf::PdfTextSource;

use std::path::Path;

use crate::error::SourceError;
use crate::models::config::SourceConfig;

/// Trait for document-to-text conversion.
pub trait TextSource {
    /// Extract text from document bytes.
    fn extract_text(&self, data: &[u8]) -> Result<String, SourceError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Kind of document, decided from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// UTF-8 text, typically OCR output.
    PlainText,
    /// PDF with embedded text.
    Pdf,
    /// Raster image that would need OCR.
    Image,
}

impl SourceKind {
    /// Determine the document kind from a path.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" | "ocr" => Ok(Self::PlainText),
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" => Ok(Self::Image),
            "" => Err(SourceError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(SourceError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Build the text source for this kind.
    pub fn text_source(self, config: &SourceConfig) -> Result<Box<dyn TextSource + Send + Sync>, SourceError> {
        match self {
            Self::PlainText => Ok(Box::new(PlainTextSource::new())),
            #[cfg(feature = "pdf")]
            Self::Pdf => Ok(Box::new(PdfTextSource::new().with_min_text_chars(config.min_pdf_text_chars))),
            #[cfg(not(feature = "pdf"))]
            Self::Pdf => {
                let _ = config;
                Err(SourceError::UnsupportedFormat(
                    "PDF support is not enabled".to_string(),
                ))
            }
            Self::Image => Err(SourceError::UnsupportedFormat(
                "image input needs OCR; pass the recognized text instead".to_string(),
            )),
        }
    }
}
