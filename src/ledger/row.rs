use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::category::Category;
use super::fields::{amount_field, category_field, date_field, lenient_bool, null_as_default};

/// Opaque row identifier, stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn generate() -> Self {
        Self(format!("row-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of money for a row.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    #[default]
    Expense,
}

impl EntryType {
    /// Classification for a stored row whose type is missing or invalid.
    /// Anything that is not an expense counts as income.
    pub fn unrecognized() -> Self {
        EntryType::Income
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(EntryType::Income),
            "expense" => Some(EntryType::Expense),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        // Case and surrounding whitespace are ignored, unlike the exact
        // `"expense"` match stored browser data was written against.
        Ok(match value {
            Value::String(text) if text.trim().eq_ignore_ascii_case("expense") => {
                EntryType::Expense
            }
            _ => EntryType::unrecognized(),
        })
    }
}

/// Read-only view the totals engine needs from a ledger record.
pub trait LedgerEntry {
    fn entry_type(&self) -> EntryType;

    /// Numeric amount with malformed or missing values coerced to zero.
    fn amount_value(&self) -> f64;

    fn entry_date(&self) -> Option<NaiveDate>;
}

/// One income or expense entry in a monthly ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default = "RowId::generate")]
    pub id: RowId,
    #[serde(default, with = "date_field")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, with = "category_field")]
    pub category: Option<Category>,
    #[serde(rename = "type", default = "EntryType::unrecognized")]
    pub kind: EntryType,
    #[serde(default, with = "amount_field")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
}

impl Row {
    /// Builds a blank expense row with a fresh identifier.
    pub fn new() -> Self {
        Self {
            id: RowId::generate(),
            date: None,
            description: String::new(),
            category: None,
            kind: EntryType::default(),
            amount: None,
            recurring: false,
            payment: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_kind(mut self, kind: EntryType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// A row with no date, no description and no amount carries no data and
    /// is dropped before persistence.
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.description.trim().is_empty() && self.amount_value() == 0.0
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerEntry for Row {
    fn entry_type(&self) -> EntryType {
        self.kind
    }

    fn amount_value(&self) -> f64 {
        self.amount.filter(|value| value.is_finite()).unwrap_or(0.0)
    }

    fn entry_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn entry_type(&self) -> EntryType {
        (**self).entry_type()
    }

    fn amount_value(&self) -> f64 {
        (**self).amount_value()
    }

    fn entry_date(&self) -> Option<NaiveDate> {
        (**self).entry_date()
    }
}
