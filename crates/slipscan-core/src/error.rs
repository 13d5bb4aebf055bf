//! Error types for the slipscan-core library.
//!
//! The receipt pipeline itself never fails: malformed lines are skipped and
//! a missing date falls back to a configured one. Errors only come from the
//! collaborators that turn raw bytes into text before the pipeline runs.

use thiserror::Error;

/// Main error type for the slipscan library.
#[derive(Error, Debug)]
pub enum SlipscanError {
    /// Text could not be extracted from the input document.
    #[error("extraction failed: {0}")]
    Source(#[from] SourceError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning document bytes into text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The bytes are not valid UTF-8 text.
    #[error("input is not valid UTF-8 (at byte {0})")]
    InvalidUtf8(usize),

    /// The document contains no text at all.
    #[error("document is empty")]
    Empty,

    /// No text source is available for this kind of document.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document has no embedded text and needs OCR.
    #[error("no extractable text ({chars} characters found, more than {required} required)")]
    NoExtractableText { chars: usize, required: usize },

    /// The underlying extractor failed.
    #[error("{0}")]
    ExtractionFailed(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

impl From<PdfError> for SourceError {
    fn from(err: PdfError) -> Self {
        SourceError::ExtractionFailed(err.to_string())
    }
}

/// Result type for the slipscan library.
pub type Result<T> = std::result::Result<T, SlipscanError>;
