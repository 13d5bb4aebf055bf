//! Transaction records produced from receipt text.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Source tag attached to transactions recovered from a receipt.
pub const RECEIPT_SOURCE: &str = "receipt_upload";

/// A transaction recovered from a single receipt line, before categorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCandidate {
    /// Transaction date.
    pub date: NaiveDate,

    /// Cleaned, human-readable description.
    pub description: String,

    /// Signed amount with two fractional digits. Negative for refunds and credits.
    pub amount: Decimal,
}

impl TransactionCandidate {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }

    /// Key used to detect duplicates: normalized description and exact amount.
    pub fn dedup_key(&self) -> (String, Decimal) {
        (self.description.trim().to_lowercase(), self.amount)
    }
}

/// A categorized transaction, the output unit of the receipt pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date (serialized as `YYYY-MM-DD`).
    pub date: NaiveDate,

    /// Cleaned, human-readable description.
    pub description: String,

    /// Signed amount with two fractional digits.
    pub amount: Decimal,

    /// Best-guess spending category.
    pub suggested_category: Category,

    /// Where the transaction came from.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    RECEIPT_SOURCE.to_string()
}

impl Transaction {
    /// Attach a category to a candidate.
    pub fn from_candidate(candidate: TransactionCandidate, category: Category) -> Self {
        Self {
            date: candidate.date,
            description: candidate.description,
            amount: candidate.amount,
            suggested_category: category,
            source: default_source(),
        }
    }

    /// Whether this transaction reduces spending (refund, credit, reversal).
    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_negative()
    }
}
