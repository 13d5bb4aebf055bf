//! Rule-based extractors for receipt text.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod dedup;
pub mod description;
pub mod patterns;
pub mod selection;

pub use amounts::{extract_amounts, format_amount, parse_amount, AmountToken, AmountTokenizer};
pub use category::{normalize, suggest_category, KeywordTable};
pub use dates::{extract_date, DateExtractor, DateGrammar, DateMatch};
pub use dedup::dedup_candidates;
pub use description::{amount_pattern, clean_description, is_stop_word};
pub use selection::{choose_line_amount, select_amount, LineAmount};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first (highest-priority) occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
