//! Data models.

pub mod category;
pub mod config;
pub mod transaction;

pub use category::Category;
pub use config::{ClassifierConfig, ParsingConfig, SlipscanConfig, SourceConfig};
pub use transaction::{Transaction, TransactionCandidate, RECEIPT_SOURCE};
