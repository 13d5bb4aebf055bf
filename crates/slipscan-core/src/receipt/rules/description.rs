//! Description cleanup for receipt lines.

use regex::Regex;
use rust_decimal::Decimal;

use super::amounts::format_amount;
use super::patterns::STOP_WORDS;

/// Build a pattern matching the printed forms of `amount`.
///
/// Only this specific numeral is matched (grouped or ungrouped, with an
/// optional paren, minus or currency symbol).
pub fn amount_pattern(amount: Decimal) -> Option<Regex> {
    let ungrouped = regex::escape(&format_amount(amount.abs(), false));
    let grouped = regex::escape(&format_amount(amount.abs(), true));

    let numeral = if grouped == ungrouped {
        ungrouped
    } else {
        format!("{}|{}", grouped, ungrouped)
    };

    Regex::new(&format!(r"\(?-?\s*[$€₹]?\s*(?:{})\)?", numeral)).ok()
}

/// Remove the chosen amount and receipt boilerplate from a line.
///
/// The result is re-joined with single spaces and trimmed. It may be empty;
/// callers decide whether it is long enough to keep.
pub fn clean_description(line: &str, amount: Decimal) -> String {
    let stripped = match amount_pattern(amount) {
        Some(pattern) => strip_numeral(&pattern, line),
        None => line.to_string(),
    };

    stripped
        .split_whitespace()
        .filter(|word| !is_stop_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace every standalone match of `pattern` with a space.
///
/// A match right after a digit or `,` is the tail of a larger number and is
/// left alone, so `2512.50` survives when removing `12.50`. Removing one
/// match can splice a new standalone one together, so scanning restarts
/// after each replacement.
fn strip_numeral(pattern: &Regex, line: &str) -> String {
    let mut cleaned = line.to_string();
    let mut pos = 0;

    while let Some(m) = pattern.find_at(&cleaned, pos) {
        let range = m.range();
        if follows_number(&cleaned, range.start) {
            pos = range.start + cleaned[range.start..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        cleaned.replace_range(range, " ");
        pos = 0;
    }

    cleaned
}

fn follows_number(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || c == ',')
}

/// Whether `word` is receipt boilerplate, ignoring case and surrounding punctuation.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    if STOP_WORDS.contains(&lower.as_str()) {
        return true;
    }

    let trimmed = lower.trim_matches(|c: char| !c.is_alphanumeric());
    !trimmed.is_empty() && STOP_WORDS.contains(&trimmed)
}
