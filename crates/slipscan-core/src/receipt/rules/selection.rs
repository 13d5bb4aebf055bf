//! Per-line choice of the transaction amount.

use rust_decimal::Decimal;

use super::amounts::AmountToken;
use super::patterns::{contains_any, AVOID_KEYWORDS, TOTAL_KEYWORDS};

/// Outcome of choosing an amount for one receipt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAmount {
    /// The line has no amount tokens.
    NoAmount,
    /// The line mentions a subtotal, tax, tip or fee and is never a transaction.
    Avoided(&'static str),
    /// Total line: the largest absolute amount.
    Total(Decimal),
    /// Regular line: the rightmost amount.
    Rightmost(Decimal),
}

impl LineAmount {
    /// The selected signed amount, if the line produced one.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Total(amount) | Self::Rightmost(amount) => Some(*amount),
            Self::NoAmount | Self::Avoided(_) => None,
        }
    }
}

/// Decide which amount, if any, represents the transaction on `line`.
///
/// Keyword checks are substring matches on the lowercased line, so "fee"
/// also rejects "coffee" and "tip" rejects "multiple".
pub fn choose_line_amount(line: &str, tokens: &[AmountToken]) -> LineAmount {
    let Some(last) = tokens.last() else {
        return LineAmount::NoAmount;
    };

    let lower = line.to_lowercase();

    if let Some(keyword) = contains_any(&lower, AVOID_KEYWORDS) {
        return LineAmount::Avoided(keyword);
    }

    if contains_any(&lower, TOTAL_KEYWORDS).is_some() {
        // First occurrence wins on ties
        let largest = tokens.iter().skip(1).fold(&tokens[0], |best, token| {
            if token.magnitude > best.magnitude {
                token
            } else {
                best
            }
        });
        return LineAmount::Total(largest.signed());
    }

    LineAmount::Rightmost(last.signed())
}

/// Select the signed amount for a line, or `None` when the line is skipped.
pub fn select_amount(line: &str, tokens: &[AmountToken]) -> Option<Decimal> {
    choose_line_amount(line, tokens).amount()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::rules::amounts::extract_amounts;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn choose(line: &str) -> LineAmount {
        choose_line_amount(line, &extract_amounts(line))
    }

    #[test]
    fn test_no_tokens() {
        assert_eq!(choose("Thank you for shopping"), LineAmount::NoAmount);
        assert_eq!(select_amount("Thank you", &[]), None);
    }

    #[test]
    fn test_avoid_keywords_reject_line() {
        assert_eq!(choose("Subtotal 40.00"), LineAmount::Avoided("subtotal"));
        assert_eq!(choose("Sales Tax 3.20"), LineAmount::Avoided("tax"));
        assert_eq!(choose("Tip 5.00"), LineAmount::Avoided("tip"));
        assert_eq!(choose("Service fee 1.99"), LineAmount::Avoided("fee"));
        assert_eq!(choose("Fuel Surcharge 2.00"), LineAmount::Avoided("surcharge"));
    }

    #[test]
    fn test_avoid_beats_total() {
        assert_eq!(choose("Total tax 4.00 on 50.00"), LineAmount::Avoided("tax"));
    }

    #[test]
    fn test_avoid_keywords_match_inside_words() {
        assert_eq!(choose("Iced Coffee 3.50"), LineAmount::Avoided("fee"));
    }

    #[test]
    fn test_total_line_picks_largest_absolute() {
        assert_eq!(
            choose("Items 12.00 3.50 Total 45.99 Paid 20.00"),
            LineAmount::Total(dec("45.99"))
        );
        assert_eq!(choose("Amount due (60.00) 10.00"), LineAmount::Total(dec("-60.00")));
    }

    #[test]
    fn test_total_tie_keeps_first_occurrence() {
        assert_eq!(choose("Balance due (8.00) 8.00"), LineAmount::Total(dec("-8.00")));
    }

    #[test]
    fn test_regular_line_picks_rightmost() {
        assert_eq!(choose("Bananas 2 @ 0.99 1.98"), LineAmount::Rightmost(dec("1.98")));
        assert_eq!(choose("Milk 100.00 2.99"), LineAmount::Rightmost(dec("2.99")));
    }

    #[test]
    fn test_grand_total_example() {
        assert_eq!(select_amount("Grand Total: $45.99", &extract_amounts("Grand Total: $45.99")), Some(dec("45.99")));
    }
}
