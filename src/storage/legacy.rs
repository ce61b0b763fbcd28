//! Import of the single-list expense format.
//!
//! The older tracker kept one flat array of expenses under
//! [`LEGACY_STORAGE_KEY`], each shaped
//! `{ "data", "descricao", "categoria", "pagamento", "valor" }`. Entries are
//! converted into expense rows and appended to the matching month ledgers.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::ledger::{parse_amount, parse_date, Category, EntryType, MonthKey, Row};

use super::{KeyValueStore, MonthStore, Result};

pub const LEGACY_STORAGE_KEY: &str = "controle-financeiro-gastos";

const DEFAULT_DESCRIPTION: &str = "Sem descrição";

/// One entry of the single-list format, read tolerantly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyExpense {
    #[serde(rename = "data", default)]
    pub date: Option<Value>,
    #[serde(rename = "descricao", default)]
    pub description: Option<Value>,
    #[serde(rename = "categoria", default)]
    pub category: Option<Value>,
    #[serde(rename = "pagamento", default)]
    pub payment: Option<Value>,
    #[serde(rename = "valor", default)]
    pub amount: Option<Value>,
}

impl LegacyExpense {
    /// Converts the entry into an expense row and the month it belongs to.
    /// Entries without a usable date or a positive amount yield `None`.
    pub fn into_row(self) -> Option<(MonthKey, Row)> {
        let date = text(&self.date).and_then(|raw| parse_date(&raw))?;
        let amount = match self.amount {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(raw)) => parse_amount(&raw),
            _ => None,
        }
        .filter(|value| value.is_finite() && *value > 0.0)?;

        let description = text(&self.description)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        let mut row = Row::new()
            .with_date(date)
            .with_description(description)
            .with_kind(EntryType::Expense)
            .with_amount(amount);
        row.category = Category::from_stored(text(&self.category).as_deref());
        row.payment = text(&self.payment)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        Some((MonthKey::from_date(date), row))
    }
}

fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(raw)) => Some(raw.clone()),
        _ => None,
    }
}

/// Parses a legacy document. Anything that is not an array, and any element
/// that is not an object, is ignored.
pub fn parse_legacy_document(raw: &str) -> Vec<LegacyExpense> {
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            tracing::warn!("legacy document is not a list; nothing to import");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "legacy document unreadable; nothing to import");
            return Vec::new();
        }
    };
    values
        .into_iter()
        .filter_map(|value| serde_json::from_value::<LegacyExpense>(value).ok())
        .collect()
}

/// Reads legacy entries from a key-value backend under [`LEGACY_STORAGE_KEY`].
pub fn read_legacy_expenses(backend: &dyn KeyValueStore) -> Vec<LegacyExpense> {
    match backend.get(LEGACY_STORAGE_KEY) {
        Ok(Some(raw)) => parse_legacy_document(&raw),
        Ok(None) => Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "legacy store unreadable; nothing to import");
            Vec::new()
        }
    }
}

/// Outcome of a legacy import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub months: Vec<MonthKey>,
}

/// Appends legacy entries to the month ledgers in `store`. Entries that are
/// unusable or already present (same date, description, amount and type) are
/// counted as skipped, so running the import twice is harmless.
pub fn import_legacy_expenses(
    store: &mut MonthStore,
    expenses: Vec<LegacyExpense>,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut by_month: BTreeMap<MonthKey, Vec<Row>> = BTreeMap::new();
    for expense in expenses {
        match expense.into_row() {
            Some((month, row)) => by_month.entry(month).or_default().push(row),
            None => report.skipped += 1,
        }
    }

    for (month, rows) in by_month {
        let mut ledger = store.load(&month);
        let mut added = 0;
        for row in rows {
            let duplicate = ledger.rows.iter().any(|existing| same_entry(existing, &row));
            if duplicate {
                report.skipped += 1;
            } else {
                ledger.add_row(row);
                added += 1;
            }
        }
        if added > 0 {
            store.save(&month, &ledger)?;
            report.imported += added;
            report.months.push(month);
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        months = report.months.len(),
        "legacy import finished"
    );
    Ok(report)
}

fn same_entry(a: &Row, b: &Row) -> bool {
    a.date == b.date && a.description == b.description && a.amount == b.amount && a.kind == b.kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn entry(value: Value) -> LegacyExpense {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn converts_entry_into_expense_row() {
        let (month, row) = entry(json!({
            "data": "2024-01-05",
            "descricao": "Mercado",
            "categoria": "Groceries",
            "pagamento": "Pix",
            "valor": 100.0
        }))
        .into_row()
        .expect("usable entry");
        assert_eq!(month.to_string(), "2024-01");
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(row.description, "Mercado");
        assert_eq!(row.category, Some(Category::Groceries));
        assert_eq!(row.kind, EntryType::Expense);
        assert_eq!(row.amount, Some(100.0));
        assert_eq!(row.payment.as_deref(), Some("Pix"));
    }

    #[test]
    fn blank_description_gets_placeholder() {
        let (_, row) = entry(json!({ "data": "2024-01-05", "descricao": "  ", "valor": "12,5" }))
            .into_row()
            .unwrap();
        assert_eq!(row.description, "Sem descrição");
        assert_eq!(row.amount, Some(12.5));
        assert_eq!(row.category, None);
    }

    #[test]
    fn unusable_entries_are_rejected() {
        assert!(entry(json!({ "data": "", "valor": 10 })).into_row().is_none());
        assert!(entry(json!({ "data": "2024-01-05", "valor": 0 }))
            .into_row()
            .is_none());
        assert!(entry(json!({ "data": "2024-01-05", "valor": "x" }))
            .into_row()
            .is_none());
    }

    #[test]
    fn non_array_documents_parse_to_nothing() {
        assert!(parse_legacy_document("{}").is_empty());
        assert!(parse_legacy_document("not json").is_empty());
        assert_eq!(parse_legacy_document(r#"[{"valor":1}, 5]"#).len(), 1);
    }
}
