//! Keyword-based category suggestions.
//!
//! A description is normalized (lowercased, punctuation collapsed to single
//! spaces) and every category is scored by how many of its keywords occur in
//! it. Matching is by substring, not whole word, so plurals and compounds
//! still hit ("bananas", "pizzeria"); the price is occasional false hits
//! such as "date" inside "update".

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use tracing::{debug, warn};

use super::patterns::NON_ALPHANUMERIC;
use crate::models::category::Category;

/// Built-in keyword rules.
const BUILTIN_RULES: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "pizza", "burger", "restaurant", "nugget", "milk", "banana", "chicken", "date",
            "spice", "bread", "butter", "egg", "curd", "paneer", "cheese", "yogurt", "chapathi",
            "dal",
        ],
    ),
    (
        Category::Groceries,
        &[
            "costco", "kroger", "walmart", "vegetable", "oil", "blueberry", "peanut", "flour",
            "rice", "lentil", "tindora", "spinach", "onion", "tomato", "banana", "fruit", "greens",
        ],
    ),
    (
        Category::Transport,
        &["uber", "lyft", "gas", "fuel", "ride", "toll", "parking"],
    ),
    (
        Category::Household,
        &[
            "detergent", "tide", "spray", "nexxus", "shampoo", "cleaner", "soap", "paper", "tissue",
        ],
    ),
    (
        Category::Health,
        &[
            "protein", "iq bar", "ks protein", "vitamin", "supplement", "whey", "electrolyte",
        ],
    ),
];

lazy_static! {
    static ref BUILTIN_TABLE: KeywordTable = KeywordTable::from_rules(
        BUILTIN_RULES
            .iter()
            .map(|(category, keywords)| (*category, keywords.iter().copied()))
    );
}

/// Normalize text for keyword matching.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lower, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Immutable mapping from category to normalized keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    rules: BTreeMap<Category, Vec<String>>,
}

impl KeywordTable {
    /// The built-in table, shared by every caller.
    pub fn builtin() -> &'static KeywordTable {
        &BUILTIN_TABLE
    }

    /// Build a table from (category, keywords) pairs.
    ///
    /// Keywords are normalized; empty and repeated ones are dropped.
    /// `Uncategorized` cannot carry keywords.
    pub fn from_rules<I, K, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Category, K)>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (category, keywords) in rules {
            table.add_keywords(category, keywords);
        }
        table
    }

    /// The built-in table extended with extra keywords.
    pub fn with_extra(extra: &BTreeMap<Category, Vec<String>>) -> Self {
        let mut table = Self::builtin().clone();
        for (category, keywords) in extra {
            table.add_keywords(*category, keywords);
        }
        table
    }

    fn add_keywords<K, S>(&mut self, category: Category, keywords: K)
    where
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if category.is_uncategorized() {
            warn!("Ignoring keywords configured for {}", category);
            return;
        }

        let entry = self.rules.entry(category).or_default();
        for keyword in keywords {
            let keyword = normalize(keyword.as_ref());
            if !keyword.is_empty() && !entry.contains(&keyword) {
                entry.push(keyword);
            }
        }
    }

    /// Keywords configured for `category`.
    pub fn keywords(&self, category: Category) -> &[String] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of keyword hits per category, for categories with at least one hit.
    pub fn score(&self, description: &str) -> BTreeMap<Category, usize> {
        let normalized = normalize(description);
        if normalized.is_empty() {
            return BTreeMap::new();
        }

        self.rules
            .iter()
            .map(|(category, keywords)| {
                let hits = keywords.iter().filter(|kw| normalized.contains(kw.as_str())).count();
                (*category, hits)
            })
            .filter(|(_, hits)| *hits > 0)
            .collect()
    }

    /// The best-scoring category for `description`.
    ///
    /// Ties go to the category whose name sorts first.
    pub fn classify(&self, description: &str) -> Category {
        let best = self
            .score(description)
            .into_iter()
            .max_by(|(a, a_hits), (b, b_hits)| {
                a_hits.cmp(b_hits).then_with(|| b.name().cmp(a.name()))
            })
            .map(|(category, _)| category)
            .unwrap_or(Category::Uncategorized);

        debug!("Suggested {} for {:?}", best, description);
        best
    }
}

/// Suggest a category for a description using the built-in keyword table.
///
/// This is the same function the receipt pipeline uses, so manual entries
/// and parsed receipts are classified identically.
pub fn suggest_category(description: &str) -> Category {
    KeywordTable::builtin().classify(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  KS-Protein!!  Bar "), "ks protein bar");
        assert_eq!(normalize("Crème brûlée"), "cr me br l e");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_suggest_category() {
        assert_eq!(suggest_category("Pizza Hut"), Category::Food);
        assert_eq!(suggest_category("UBER *TRIP"), Category::Transport);
        assert_eq!(suggest_category("Tide Pods"), Category::Household);
        assert_eq!(suggest_category("Whey isolate"), Category::Health);
        assert_eq!(suggest_category("Kroger"), Category::Groceries);
    }

    #[test]
    fn test_uncategorized() {
        assert_eq!(suggest_category("Hardware store"), Category::Uncategorized);
        assert_eq!(suggest_category(""), Category::Uncategorized);
        assert_eq!(suggest_category("!!!"), Category::Uncategorized);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(suggest_category("Bananas"), Category::Food);
        assert_eq!(suggest_category("Software update"), Category::Food);
    }

    #[test]
    fn test_highest_score_wins() {
        // walmart + onion + tomato vs nothing else
        assert_eq!(suggest_category("Walmart onion tomato"), Category::Groceries);
        // ks protein + protein count twice for Health, milk once for Food
        assert_eq!(suggest_category("KS Protein milk"), Category::Health);
    }

    #[test]
    fn test_tie_goes_to_smallest_name() {
        // "banana" is both a Food and a Groceries keyword
        assert_eq!(suggest_category("banana"), Category::Food);
        // one Household hit (soap) vs one Transport hit (uber)
        assert_eq!(suggest_category("uber soap"), Category::Household);
    }

    #[test]
    fn test_score() {
        let scores = KeywordTable::builtin().score("chicken rice");
        assert_eq!(scores.get(&Category::Food), Some(&1));
        assert_eq!(scores.get(&Category::Groceries), Some(&1));
        assert_eq!(scores.get(&Category::Transport), None);
    }

    #[test]
    fn test_with_extra_keywords() {
        let mut extra = BTreeMap::new();
        extra.insert(Category::Transport, vec!["Metro-Card".to_string(), "uber".to_string()]);
        extra.insert(Category::Uncategorized, vec!["misc".to_string()]);

        let table = KeywordTable::with_extra(&extra);
        assert_eq!(table.classify("metro card reload"), Category::Transport);
        assert_eq!(table.keywords(Category::Uncategorized), &[] as &[String]);
        assert_eq!(
            table.keywords(Category::Transport).iter().filter(|k| *k == "uber").count(),
            1
        );
        assert_eq!(KeywordTable::builtin().classify("metro card reload"), Category::Uncategorized);
    }

    #[test]
    fn test_classify_is_pure() {
        let first = suggest_category("Costco blueberry");
        for _ in 0..5 {
            assert_eq!(suggest_category("Costco blueberry"), first);
        }
    }
}
