//! WASM bindings for receipt transaction extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR happens on the JavaScript side; these functions take the recognized text.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use slipscan_core::{ParseReport, ReceiptParser, TransactionParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract transactions from receipt text.
///
/// Transactions are dated with the first date found in the text, or today.
#[wasm_bindgen]
pub fn parse_receipt(text: &str) -> Result<JsValue, JsValue> {
    ReceiptScanner::new().scan_with_report(text)
}

/// Extract transactions, using `fallback_date` (`YYYY-MM-DD`) when the text has no date.
#[wasm_bindgen]
pub fn parse_receipt_on(text: &str, fallback_date: &str) -> Result<JsValue, JsValue> {
    let date = parse_iso_date(fallback_date).map_err(|e| JsValue::from_str(&e))?;
    let report = ReceiptParser::new().with_fallback_date(date).parse(text);
    report_to_js(&report)
}

/// Suggest a category for a manually entered description.
#[wasm_bindgen]
pub fn suggest_category(description: &str) -> String {
    slipscan_core::suggest_category(description).to_string()
}

/// Receipt scanner class for browser use.
#[wasm_bindgen]
pub struct ReceiptScanner {
    min_description_chars: usize,
    fallback_date: Option<NaiveDate>,
}

#[wasm_bindgen]
impl ReceiptScanner {
    /// Create a new receipt scanner.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let defaults = slipscan_core::models::ParsingConfig::default();
        Self {
            min_description_chars: defaults.min_description_chars,
            fallback_date: defaults.fallback_date,
        }
    }

    /// Set the minimum description length.
    #[wasm_bindgen]
    pub fn set_min_description_chars(&mut self, chars: usize) {
        self.min_description_chars = chars;
    }

    /// Set the date used when a receipt has none (`YYYY-MM-DD`).
    #[wasm_bindgen]
    pub fn set_fallback_date(&mut self, date: &str) -> Result<(), JsValue> {
        self.fallback_date = Some(parse_iso_date(date).map_err(|e| JsValue::from_str(&e))?);
        Ok(())
    }

    /// Extract the transactions from receipt text.
    #[wasm_bindgen]
    pub fn scan(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self.parser().parse(text);
        serde_wasm_bindgen::to_value(&report.transactions)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract transactions along with the date source, stats and warnings.
    #[wasm_bindgen]
    pub fn scan_with_report(&self, text: &str) -> Result<JsValue, JsValue> {
        report_to_js(&self.parser().parse(text))
    }
}

impl ReceiptScanner {
    fn parser(&self) -> ReceiptParser {
        let fallback = self.fallback_date.unwrap_or_else(today);
        ReceiptParser::new()
            .with_min_description_chars(self.min_description_chars)
            .with_fallback_date(fallback)
    }
}

impl Default for ReceiptScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn report_to_js(report: &ParseReport) -> Result<JsValue, JsValue> {
    for warning in &report.warnings {
        web_sys::console::warn_1(&JsValue::from_str(warning));
    }
    serde_wasm_bindgen::to_value(report).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_iso_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?}: {}", date, e))
}

/// Today's local date from the JavaScript clock.
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}
