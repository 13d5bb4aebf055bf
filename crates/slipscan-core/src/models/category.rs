//! Spending categories suggested for receipt transactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A spending category.
///
/// The set is closed. `Uncategorized` is the sentinel returned when no
/// keyword matches a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Groceries,
    Health,
    Household,
    Transport,
    Uncategorized,
}

impl Category {
    /// Categories that can be matched by keywords, in name order.
    pub const SCORED: [Category; 5] = [
        Category::Food,
        Category::Groceries,
        Category::Health,
        Category::Household,
        Category::Transport,
    ];

    /// Display name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Groceries => "Groceries",
            Self::Health => "Health",
            Self::Household => "Household",
            Self::Transport => "Transport",
            Self::Uncategorized => "Uncategorized",
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Self::Uncategorized)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Uncategorized
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "groceries" | "grocery" => Ok(Self::Groceries),
            "health" => Ok(Self::Health),
            "household" => Ok(Self::Household),
            "transport" | "transportation" => Ok(Self::Transport),
            "uncategorized" | "" => Ok(Self::Uncategorized),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}
