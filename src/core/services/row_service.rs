//! Validated edits on the rows of a monthly ledger.

use chrono::NaiveDate;

use crate::core::services::ServiceResult;
use crate::errors::LedgerError;
use crate::ledger::{parse_amount, parse_date, Category, EntryType, MonthlyLedger, Row, RowId};

/// Partial update for a row. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub category: Option<Option<Category>>,
    pub kind: Option<EntryType>,
    pub amount: Option<Option<f64>>,
    pub recurring: Option<bool>,
    pub payment: Option<Option<String>>,
}

impl RowPatch {
    pub const FIELDS: [&'static str; 7] = [
        "date",
        "description",
        "category",
        "type",
        "amount",
        "recurring",
        "payment",
    ];

    /// Builds a single-field patch from user text. An empty value clears the
    /// field where clearing makes sense.
    pub fn from_field(field: &str, value: &str) -> ServiceResult<Self> {
        let raw = value.trim();
        let mut patch = RowPatch::default();
        match field.trim().to_ascii_lowercase().as_str() {
            "date" => patch.date = Some(parse_optional_date(raw)?),
            "description" | "desc" => patch.description = Some(raw.to_string()),
            "category" => {
                patch.category = Some(if raw.is_empty() {
                    None
                } else {
                    Some(raw.parse::<Category>().map_err(LedgerError::Validation)?)
                })
            }
            "type" | "kind" => {
                patch.kind = Some(EntryType::parse(raw).ok_or_else(|| {
                    LedgerError::Validation(format!(
                        "unknown type `{raw}` (expected income or expense)"
                    ))
                })?)
            }
            "amount" => patch.amount = Some(parse_optional_amount(raw)?),
            "recurring" => {
                patch.recurring = Some(match raw.to_ascii_lowercase().as_str() {
                    "yes" | "y" | "true" | "1" => true,
                    "no" | "n" | "false" | "0" | "" => false,
                    other => {
                        return Err(LedgerError::Validation(format!(
                            "expected yes or no for recurring, got `{other}`"
                        )))
                    }
                })
            }
            "payment" => {
                patch.payment = Some(if raw.is_empty() {
                    None
                } else {
                    Some(raw.to_string())
                })
            }
            other => {
                return Err(LedgerError::Validation(format!(
                    "unknown field `{other}` (expected one of: {})",
                    Self::FIELDS.join(", ")
                )))
            }
        }
        Ok(patch)
    }

    pub fn apply(self, row: &mut Row) {
        if let Some(date) = self.date {
            row.date = date;
        }
        if let Some(description) = self.description {
            row.description = description;
        }
        if let Some(category) = self.category {
            row.category = category;
        }
        if let Some(kind) = self.kind {
            row.kind = kind;
        }
        if let Some(amount) = self.amount {
            row.amount = amount;
        }
        if let Some(recurring) = self.recurring {
            row.recurring = recurring;
        }
        if let Some(payment) = self.payment {
            row.payment = payment;
        }
    }
}

/// Parses a `YYYY-MM-DD` date; blank input means "unset".
pub fn parse_optional_date(raw: &str) -> ServiceResult<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| LedgerError::InvalidDate(raw.trim().to_string()))
}

/// Parses a non-negative amount; blank input means "unset".
pub fn parse_optional_amount(raw: &str) -> ServiceResult<Option<f64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let amount = parse_amount(raw)
        .ok_or_else(|| LedgerError::Validation(format!("`{}` is not a number", raw.trim())))?;
    ensure_amount(Some(amount))?;
    Ok(Some(amount))
}

fn ensure_amount(amount: Option<f64>) -> ServiceResult<()> {
    match amount {
        Some(value) if !value.is_finite() => Err(LedgerError::Validation(
            "amount must be a finite number".into(),
        )),
        Some(value) if value < 0.0 => Err(LedgerError::Validation(
            "amount must not be negative".into(),
        )),
        _ => Ok(()),
    }
}

/// Provides validated add/update/remove helpers for ledger rows.
pub struct RowService;

impl RowService {
    pub fn validate(row: &Row) -> ServiceResult<()> {
        ensure_amount(row.amount)
    }

    /// Adds a row and returns its identifier.
    pub fn add(ledger: &mut MonthlyLedger, row: Row) -> ServiceResult<RowId> {
        Self::validate(&row)?;
        Ok(ledger.add_row(row))
    }

    /// Applies `patch` to the row identified by `id`. The row is left
    /// untouched when the patched result fails validation.
    pub fn update(ledger: &mut MonthlyLedger, id: &RowId, patch: RowPatch) -> ServiceResult<()> {
        let row = ledger
            .row_mut(id)
            .ok_or_else(|| LedgerError::RowNotFound(id.to_string()))?;
        let mut candidate = row.clone();
        patch.apply(&mut candidate);
        Self::validate(&candidate)?;
        *row = candidate;
        Ok(())
    }

    /// Removes the row identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut MonthlyLedger, id: &RowId) -> ServiceResult<Row> {
        ledger
            .remove_row(id)
            .ok_or_else(|| LedgerError::RowNotFound(id.to_string()))
    }
}
