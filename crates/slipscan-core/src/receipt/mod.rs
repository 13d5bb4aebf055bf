//! Receipt transaction extraction.
//!
//! Text flows through these stages:
//! 1. the whole document is searched once for a date ([`rules::dates`]);
//! 2. each line is tokenized for amounts ([`rules::amounts`]);
//! 3. one amount is chosen per line, or the line is rejected ([`rules::selection`]);
//! 4. the amount and boilerplate are stripped to form a description ([`rules::description`]);
//! 5. repeated (description, amount) pairs are dropped ([`rules::dedup`]);
//! 6. each survivor gets a suggested category ([`rules::category`]).

mod parser;
pub mod rules;

pub use parser::{parse_transactions, DateSource, LineStats, ParseReport, ReceiptParser};
pub use rules::category::suggest_category;

/// Trait for receipt parsing.
pub trait TransactionParser {
    /// Parse receipt text into categorized transactions.
    ///
    /// Never fails: lines that cannot be interpreted are skipped.
    fn parse(&self, text: &str) -> ParseReport;
}
