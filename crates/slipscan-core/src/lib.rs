//! Core library for turning receipt text into categorized transactions.
//!
//! This crate provides:
//! - Amount, date and description extraction from OCR'd receipt lines
//! - Duplicate removal and keyword-based category suggestions
//! - Text sources for plain text and (with the `pdf` feature) text-based PDFs
//! - JSON configuration shared by the CLI and WASM front ends

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod receipt;
pub mod source;

pub use error::{PdfError, Result, SlipscanError, SourceError};
pub use models::{Category, SlipscanConfig, Transaction, TransactionCandidate};
pub use receipt::{
    parse_transactions, suggest_category, DateSource, LineStats, ParseReport, ReceiptParser,
    TransactionParser,
};
pub use source::{PlainTextSource, SourceKind, TextSource};
#[cfg(feature = "pdf")]
pub use source::PdfTextSource;

/// Extract text from document bytes and parse it.
pub fn parse_document<S, P>(source: &S, parser: &P, data: &[u8]) -> Result<ParseReport>
where
    S: TextSource + ?Sized,
    P: TransactionParser + ?Sized,
{
    let text = source.extract_text(data)?;
    tracing::debug!("{} source produced {} characters", source.name(), text.len());
    Ok(parser.parse(&text))
}
