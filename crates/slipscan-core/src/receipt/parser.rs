//! Receipt parser composing the rule-based stages into one pipeline.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::config::{ClassifierConfig, ParsingConfig};
use crate::models::transaction::{Transaction, TransactionCandidate};

use super::rules::{
    amounts::AmountTokenizer,
    category::KeywordTable,
    dates::DateExtractor,
    dedup::dedup_candidates,
    description::clean_description,
    selection::{choose_line_amount, LineAmount},
    FieldExtractor,
};
use super::TransactionParser;

/// Where the transaction date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// Found in the document text.
    Document,
    /// No date in the document; the fallback date was used.
    Fallback,
}

/// Per-document line counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    /// Lines in the document.
    pub lines: usize,
    /// Blank or too-short lines.
    pub skipped_short: usize,
    /// Lines without a monetary amount.
    pub skipped_no_amount: usize,
    /// Subtotal, tax, tip and fee lines.
    pub skipped_avoided: usize,
    /// Lines whose cleaned description was too short.
    pub skipped_description: usize,
    /// Candidates removed as duplicates.
    pub duplicates: usize,
}

/// Result of parsing one receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Categorized transactions, in document order.
    pub transactions: Vec<Transaction>,
    /// Date assigned to every transaction.
    pub date: NaiveDate,
    /// Where `date` came from.
    pub date_source: DateSource,
    /// Line counters.
    pub stats: LineStats,
    /// Non-fatal notes about the parse.
    pub warnings: Vec<String>,
}

/// Receipt parser.
///
/// Stateless apart from its settings: the same text and fallback date always
/// produce the same report, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// Date used when the document has none. `None` means today.
    fallback_date: Option<NaiveDate>,
    /// Minimum description length in characters.
    min_description_chars: usize,
    /// Minimum trimmed line length in characters.
    min_line_chars: usize,
    /// Custom keyword table. `None` uses the built-in one.
    keywords: Option<KeywordTable>,
}

impl ReceiptParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        let defaults = ParsingConfig::default();
        Self {
            fallback_date: defaults.fallback_date,
            min_description_chars: defaults.min_description_chars,
            min_line_chars: defaults.min_line_chars,
            keywords: None,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(parsing: &ParsingConfig, classifier: &ClassifierConfig) -> Self {
        let mut parser = Self::new()
            .with_min_description_chars(parsing.min_description_chars)
            .with_min_line_chars(parsing.min_line_chars);

        if let Some(date) = parsing.fallback_date {
            parser = parser.with_fallback_date(date);
        }
        if !classifier.extra_keywords.is_empty() {
            parser = parser.with_keywords(KeywordTable::with_extra(&classifier.extra_keywords));
        }
        parser
    }

    /// Set the date used when the document contains none.
    pub fn with_fallback_date(mut self, date: NaiveDate) -> Self {
        self.fallback_date = Some(date);
        self
    }

    /// Set the minimum description length.
    pub fn with_min_description_chars(mut self, chars: usize) -> Self {
        self.min_description_chars = chars;
        self
    }

    /// Set the minimum line length.
    pub fn with_min_line_chars(mut self, chars: usize) -> Self {
        self.min_line_chars = chars;
        self
    }

    /// Use a custom keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Keyword table used for categorization.
    pub fn keywords(&self) -> &KeywordTable {
        self.keywords.as_ref().unwrap_or_else(|| KeywordTable::builtin())
    }

    fn fallback_date(&self) -> NaiveDate {
        self.fallback_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Turn every line into at most one candidate.
    fn extract_candidates(
        &self,
        text: &str,
        date: NaiveDate,
        stats: &mut LineStats,
    ) -> Vec<TransactionCandidate> {
        let tokenizer = AmountTokenizer::new();
        let mut candidates = Vec::new();

        for line in text.lines() {
            stats.lines += 1;

            let line = line.trim();
            if line.chars().count() < self.min_line_chars {
                stats.skipped_short += 1;
                continue;
            }

            let tokens = tokenizer.extract_all(line);
            let amount = match choose_line_amount(line, &tokens) {
                LineAmount::NoAmount => {
                    stats.skipped_no_amount += 1;
                    continue;
                }
                LineAmount::Avoided(keyword) => {
                    debug!("Skipping line {:?}: contains {:?}", line, keyword);
                    stats.skipped_avoided += 1;
                    continue;
                }
                LineAmount::Total(amount) => {
                    debug!("Total line {:?}: selected {}", line, amount);
                    amount
                }
                LineAmount::Rightmost(amount) => amount,
            };

            let description = clean_description(line, amount);
            if description.chars().count() < self.min_description_chars {
                debug!("Dropping line {:?}: description {:?} too short", line, description);
                stats.skipped_description += 1;
                continue;
            }

            candidates.push(TransactionCandidate::new(date, description, amount));
        }

        candidates
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionParser for ReceiptParser {
    fn parse(&self, text: &str) -> ParseReport {
        info!("Parsing receipt from {} characters of text", text.len());

        let mut warnings = Vec::new();
        let mut stats = LineStats::default();

        let (date, date_source) = match DateExtractor::new().extract(text) {
            Some(found) => (found.date, DateSource::Document),
            None => {
                let fallback = self.fallback_date();
                warn!("No date found in receipt, using {}", fallback);
                warnings.push(format!("No date found in document; using {}", fallback));
                (fallback, DateSource::Fallback)
            }
        };

        let candidates = self.extract_candidates(text, date, &mut stats);
        let found = candidates.len();
        let unique = dedup_candidates(candidates);
        stats.duplicates = found - unique.len();

        let keywords = self.keywords();
        let transactions: Vec<Transaction> = unique
            .into_iter()
            .map(|candidate| {
                let category = keywords.classify(&candidate.description);
                Transaction::from_candidate(candidate, category)
            })
            .collect();

        if transactions.is_empty() && !text.trim().is_empty() {
            warnings.push("No transactions found in document".to_string());
        }

        info!(
            "Extracted {} transactions ({} duplicates removed) dated {}",
            transactions.len(),
            stats.duplicates,
            date
        );

        ParseReport {
            transactions,
            date,
            date_source,
            stats,
            warnings,
        }
    }
}

/// Parse receipt text with default settings.
///
/// `fallback` is used when the text contains no date.
pub fn parse_transactions(text: &str, fallback: NaiveDate) -> Vec<Transaction> {
    ReceiptParser::new()
        .with_fallback_date(fallback)
        .parse(text)
        .transactions
}
