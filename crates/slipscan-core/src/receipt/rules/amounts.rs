//! Amount tokenization for receipt lines.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::FieldExtractor;
use super::patterns::{contains_any, AMOUNT_TOKEN, NEGATIVE_KEYWORDS};

/// A monetary value found on a receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountToken {
    /// Absolute value with two fractional digits.
    pub magnitude: Decimal,
    /// Whether the amount is negative (refund, credit, parenthesized...).
    pub negative: bool,
    /// Byte span of the match in the line.
    pub position: (usize, usize),
    /// Matched text.
    pub source: String,
}

impl AmountToken {
    /// Magnitude combined with the sign flag. Zero stays unsigned.
    pub fn signed(&self) -> Decimal {
        if self.negative && !self.magnitude.is_zero() {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

/// Amount tokenizer.
///
/// Sign is resolved per token: a token is negative when it is parenthesized,
/// carries a leading minus, or sits on a line with a refund-like keyword.
pub struct AmountTokenizer;

impl AmountTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountTokenizer {
    type Output = AmountToken;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let line_is_negative = contains_any(&text.to_lowercase(), NEGATIVE_KEYWORDS).is_some();

        let tokens: Vec<AmountToken> = AMOUNT_TOKEN
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let (number, has_minus, parenthesized) = match caps.name("pnum") {
                    Some(num) => (num.as_str(), caps.name("psign").is_some(), true),
                    None => (caps.name("num")?.as_str(), caps.name("sign").is_some(), false),
                };

                let magnitude = parse_amount(number)?;
                Some(AmountToken {
                    magnitude,
                    negative: parenthesized || has_minus || line_is_negative,
                    position: (full_match.start(), full_match.end()),
                    source: full_match.as_str().to_string(),
                })
            })
            .collect();

        trace!("Found {} amount tokens in {:?}", tokens.len(), text);
        tokens
    }
}

/// Tokenize every amount on a line, left to right.
pub fn extract_amounts(line: &str) -> Vec<AmountToken> {
    AmountTokenizer::new().extract_all(line)
}

/// Parse a receipt-formatted amount (e.g., "1,234.56" or "12.50").
///
/// Thousands separators are dropped. Only values with exactly two fractional
/// digits are accepted.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    let (_, fraction) = cleaned.split_once('.')?;
    if fraction.len() != 2 {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Format an amount the way receipts print it (1,234.56).
pub fn format_amount(amount: Decimal, grouped: bool) -> String {
    let s = format!("{:.2}", amount.abs());
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };

    if !grouped {
        return format!("{}{}", sign, s);
    }

    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("12.50"), Some(dec("12.50")));
        assert_eq!(parse_amount("12,345,678.90"), Some(dec("12345678.90")));
        assert_eq!(parse_amount("12"), None);
        assert_eq!(parse_amount("12.5"), None);
    }

    #[test]
    fn test_parsed_amount_keeps_two_decimals() {
        assert_eq!(parse_amount("12.50").unwrap().to_string(), "12.50");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234.56"), true), "1,234.56");
        assert_eq!(format_amount(dec("1234.56"), false), "1234.56");
        assert_eq!(format_amount(dec("-5"), false), "-5.00");
        assert_eq!(format_amount(dec("999.99"), true), "999.99");
        assert_eq!(format_amount(dec("1234567.00"), true), "1,234,567.00");
    }

    #[test]
    fn test_extract_tokens_left_to_right() {
        let tokens = extract_amounts("2 x $3.50 = $7.00");
        let values: Vec<Decimal> = tokens.iter().map(|t| t.signed()).collect();
        assert_eq!(values, vec![dec("3.50"), dec("7.00")]);
    }

    #[test]
    fn test_grouped_and_currency() {
        let tokens = extract_amounts("Laptop €1,299.00");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].magnitude, dec("1299.00"));
        assert!(!tokens[0].negative);
    }

    #[test]
    fn test_integers_are_not_money() {
        assert!(extract_amounts("Table 12 Guests 4 Order 1234").is_empty());
    }

    #[test]
    fn test_parenthesized_is_negative() {
        let tokens = extract_amounts("Coupon (2.00)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].signed(), dec("-2.00"));
        assert_eq!(tokens[0].source, "(2.00)");
    }

    #[test]
    fn test_minus_is_negative() {
        let tokens = extract_amounts("Discount -$1.25");
        assert_eq!(tokens[0].signed(), dec("-1.25"));
    }

    #[test]
    fn test_sign_is_per_token() {
        let tokens = extract_amounts("Swap (1.00) 4.00");
        let values: Vec<Decimal> = tokens.iter().map(|t| t.signed()).collect();
        assert_eq!(values, vec![dec("-1.00"), dec("4.00")]);
    }

    #[test]
    fn test_negative_keyword_applies_to_all_tokens() {
        let tokens = extract_amounts("Cashback 10.00 and 2.50");
        assert!(tokens.iter().all(|t| t.negative));
        assert!(tokens.iter().all(|t| !t.magnitude.is_sign_negative()));
    }

    #[test]
    fn test_refund_with_parens() {
        let tokens = extract_amounts("Refund (5.00)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].signed(), dec("-5.00"));
    }

    #[test]
    fn test_zero_on_refund_line_is_unsigned() {
        let tokens = extract_amounts("Refund voucher 0.00");
        assert!(tokens[0].negative);
        assert!(!tokens[0].signed().is_sign_negative());
        assert_eq!(tokens[0].signed().to_string(), "0.00");
    }

    #[test]
    fn test_unclosed_paren() {
        let tokens = extract_amounts("Item (5.00");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].signed(), dec("5.00"));
    }

    #[test]
    fn test_rupee_symbol() {
        let tokens = extract_amounts("Paneer ₹ 240.00");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].magnitude, dec("240.00"));
    }

    #[test]
    fn test_empty_line() {
        let extractor = AmountTokenizer::new();
        assert!(extractor.extract("").is_none());
        assert!(extractor.extract_all("no numbers here").is_empty());
    }
}
