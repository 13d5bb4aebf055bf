//! Plain UTF-8 text input.

use tracing::trace;

use super::TextSource;
use crate::error::SourceError;

/// Reads OCR output that is already text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PlainTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String, SourceError> {
        let text = std::str::from_utf8(data).map_err(|e| SourceError::InvalidUtf8(e.valid_up_to()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        if text.trim().is_empty() {
            return Err(SourceError::Empty);
        }

        trace!("Read {} bytes of plain text", text.len());
        Ok(text.replace("\r\n", "\n"))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
