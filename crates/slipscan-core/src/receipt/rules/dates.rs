//! Document-wide date extraction for receipts.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use super::FieldExtractor;
use super::patterns::{DATE_DAY_MONTH_NAME, DATE_ISO, DATE_MONTH_NAME_DAY, DATE_NUMERIC};

/// Date grammars, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGrammar {
    /// `2024-03-20`
    Iso,
    /// `3/20/2024`, `20-03-24`
    Numeric,
    /// `20 Mar 2024`, `20 March 2024`
    DayMonthName,
    /// `Mar 20, 2024`, `March 20, 2024`
    MonthNameDay,
}

impl DateGrammar {
    pub const PRIORITY: [DateGrammar; 4] = [
        DateGrammar::Iso,
        DateGrammar::Numeric,
        DateGrammar::DayMonthName,
        DateGrammar::MonthNameDay,
    ];
}

/// A valid date found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub grammar: DateGrammar,
    /// Byte span of the match in the document.
    pub position: (usize, usize),
    pub source: String,
}

/// Date extractor.
///
/// Grammar priority outranks position: an ISO date anywhere in the document
/// wins over a numeric date that appears earlier. Matches that do not form
/// a valid calendar date are skipped.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn matches<'t>(&self, text: &'t str) -> impl Iterator<Item = DateMatch> + 't {
        DateGrammar::PRIORITY
            .into_iter()
            .flat_map(move |grammar| grammar_matches(grammar, text))
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = DateMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let found = self.matches(text).next();
        if let Some(m) = &found {
            debug!(
                "Found document date {} via {:?} grammar at byte {}",
                m.date, m.grammar, m.position.0
            );
        }
        found
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.matches(text).collect()
    }
}

/// Extract the document date, if any.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.date)
}

type Interpreter = fn(&Captures) -> Option<NaiveDate>;

fn grammar_matches(grammar: DateGrammar, text: &str) -> Box<dyn Iterator<Item = DateMatch> + '_> {
    let (pattern, interpret): (&'static Regex, Interpreter) = match grammar {
        DateGrammar::Iso => (&*DATE_ISO, parse_iso as Interpreter),
        DateGrammar::Numeric => (&*DATE_NUMERIC, parse_numeric as Interpreter),
        DateGrammar::DayMonthName => (&*DATE_DAY_MONTH_NAME, parse_day_month_name as Interpreter),
        DateGrammar::MonthNameDay => (&*DATE_MONTH_NAME_DAY, parse_month_name_day as Interpreter),
    };

    Box::new(pattern.captures_iter(text).filter_map(move |caps| {
        let full_match = caps.get(0)?;
        let date = interpret(&caps);
        if date.is_none() {
            trace!("Skipping invalid {:?} date {:?}", grammar, full_match.as_str());
        }
        Some(DateMatch {
            date: date?,
            grammar,
            position: (full_match.start(), full_match.end()),
            source: full_match.as_str().to_string(),
        })
    }))
}

fn parse_iso(caps: &Captures) -> Option<NaiveDate> {
    let year = parse_year(&caps[1])?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month-first, then day-first. Both separators must agree.
fn parse_numeric(caps: &Captures) -> Option<NaiveDate> {
    if caps[2] != caps[4] {
        return None;
    }

    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[3].parse().ok()?;
    let year = parse_year(&caps[5])?;

    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

fn parse_day_month_name(caps: &Captures) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year = parse_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_name_day(caps: &Captures) -> Option<NaiveDate> {
    let month = month_from_name(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Two- or four-digit year. Two-digit years pivot at 69: 00-68 are 2000s.
/// Year 0000 is not a calendar year.
fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    match s.len() {
        2 if year < 69 => Some(2000 + year),
        2 => Some(1900 + year),
        4 if year >= 1 => Some(year),
        _ => None,
    }
}

/// English month name, full or three-letter abbreviation, any case.
fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ];

    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|full| name == *full || (name.len() == 3 && full.starts_with(name.as_str())))
        .map(|i| i as u32 + 1)
}
