//! Common regex patterns and keyword lists for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency symbols recognized in front of an amount.
pub const CURRENCY_SYMBOLS: &str = "$€₹";

/// Keywords that turn every amount on a line negative.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "refund",
    "credit",
    "reversal",
    "cashback",
    "returned",
    "reimbursed",
];

/// Keywords marking a line that carries a document total.
pub const TOTAL_KEYWORDS: &[&str] = &["grand total", "amount due", "balance due", "total"];

/// Keywords marking a line that is never a transaction.
pub const AVOID_KEYWORDS: &[&str] = &["subtotal", "tax", "tip", "fee", "surcharge"];

/// Receipt boilerplate removed from descriptions.
pub const STOP_WORDS: &[&str] = &[
    "total", "subtotal", "tax", "tip", "amount", "price", "cost", "receipt", "invoice", "bill",
    "payment", "charge", "debit", "credit", "refund", "return", "discount", "sale", "off",
    "usd$", "usd", "lb", "kg", "oz", "g", "each", "per", "@", "x", "times", "grand", "balance",
    "due",
];

lazy_static! {
    // Monetary amounts. A parenthesized form must close; otherwise the bare
    // number after the paren is matched on its own.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"\((?P<psign>-)?\s*(?P<pcurr>[$€₹])?\s*(?P<pnum>\d{1,3}(?:,\d{3})*\.\d{2}|\d+\.\d{2})\s*\)|(?P<sign>-)?\s*(?P<curr>[$€₹])?\s*(?P<num>\d{1,3}(?:,\d{3})*\.\d{2}|\d+\.\d{2})\s*"
    ).unwrap();

    // Date grammars, in priority order
    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})([/-])(\d{1,2})([/-])(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"\b(\d{1,2})\s+([A-Za-z]{3,9})\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_MONTH_NAME_DAY: Regex = Regex::new(
        r"\b([A-Za-z]{3,9})\s+(\d{1,2}),\s*(\d{4})\b"
    ).unwrap();

    // Anything that is not a lowercase letter, digit or whitespace
    pub static ref NON_ALPHANUMERIC: Regex = Regex::new(
        r"[^a-z0-9\s]+"
    ).unwrap();
}

/// Whether the lowercase `text` contains any of `keywords` as a substring.
pub fn contains_any(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|kw| text.contains(kw))
}
