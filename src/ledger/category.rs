use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed set of labels a row can be filed under.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Salary,
    Freelance,
    Investments,
    Rent,
    Utilities,
    Groceries,
    Transport,
    Health,
    Education,
    Leisure,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Salary,
        Category::Freelance,
        Category::Investments,
        Category::Rent,
        Category::Utilities,
        Category::Groceries,
        Category::Transport,
        Category::Health,
        Category::Education,
        Category::Leisure,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investments => "Investments",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Leisure => "Leisure",
            Category::Other => "Other",
        }
    }

    /// Strict lookup by label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }

    /// Lenient reader used for persisted data: blank means unselected and any
    /// label outside the fixed set is filed under `Other`.
    pub fn from_stored(value: Option<&str>) -> Option<Self> {
        let raw = value?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self::parse(raw).unwrap_or(Category::Other))
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|category| category.label()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!(
                "unknown category `{}` (expected one of: {})",
                value.trim(),
                Self::labels().join(", ")
            )
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value).unwrap_or(Category::Other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_padding() {
        assert_eq!(Category::parse("  groceries "), Some(Category::Groceries));
        assert_eq!(Category::parse("RENT"), Some(Category::Rent));
        assert_eq!(Category::parse("Mortgage"), None);
    }

    #[test]
    fn stored_labels_fall_back_to_other() {
        assert_eq!(Category::from_stored(None), None);
        assert_eq!(Category::from_stored(Some("   ")), None);
        assert_eq!(Category::from_stored(Some("Salary")), Some(Category::Salary));
        assert_eq!(Category::from_stored(Some("Alimentação")), Some(Category::Other));
    }

    #[test]
    fn from_str_lists_known_labels_on_error() {
        let err = "Pets".parse::<Category>().expect_err("unknown label");
        assert!(err.contains("Groceries"), "unexpected message: {err}");
    }
}
