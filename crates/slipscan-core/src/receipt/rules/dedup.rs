//! Removal of repeated receipt lines.

use std::collections::HashSet;

use crate::models::transaction::TransactionCandidate;

/// Drop candidates whose (description, amount) pair was already seen.
///
/// Descriptions compare case-insensitively after trimming; amounts compare
/// exactly, sign included. First-seen order is kept.
pub fn dedup_candidates(candidates: Vec<TransactionCandidate>) -> Vec<TransactionCandidate> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn candidate(description: &str, cents: i64) -> TransactionCandidate {
        TransactionCandidate::new(
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            description,
            Decimal::new(cents, 2),
        )
    }

    #[test]
    fn test_removes_later_duplicates() {
        let input = vec![
            candidate("Uber ride", 1500),
            candidate("Milk", 299),
            candidate("uber RIDE", 1500),
        ];
        let output = dedup_candidates(input);
        assert_eq!(output, vec![candidate("Uber ride", 1500), candidate("Milk", 299)]);
    }

    #[test]
    fn test_sign_and_amount_distinguish() {
        let input = vec![
            candidate("Milk", 299),
            candidate("Milk", -299),
            candidate("Milk", 300),
        ];
        assert_eq!(dedup_candidates(input.clone()), input);
    }

    #[test]
    fn test_order_is_preserved() {
        let input = vec![
            candidate("Zucchini", 100),
            candidate("Apples", 900),
            candidate("Zucchini", 100),
            candidate("Bread", 300),
        ];
        let descriptions: Vec<String> = dedup_candidates(input)
            .into_iter()
            .map(|c| c.description)
            .collect();
        assert_eq!(descriptions, vec!["Zucchini", "Apples", "Bread"]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            candidate("Tea", 150),
            candidate("tea", 150),
            candidate("Scone", 325),
            candidate("Scone", 325),
        ];
        let once = dedup_candidates(input);
        let twice = dedup_candidates(once.clone());
        assert_eq!(once, twice);
    }
}
