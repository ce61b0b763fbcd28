use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::row::{Row, RowId};

/// Ordered rows belonging to one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLedger {
    #[serde(default, deserialize_with = "lenient_rows")]
    pub rows: Vec<Row>,
}

impl MonthlyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_row(&mut self, row: Row) -> RowId {
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    pub fn position(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn row_mut(&mut self, id: &RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| &row.id == id)
    }

    pub fn remove_row(&mut self, id: &RowId) -> Option<Row> {
        let index = self.position(id)?;
        Some(self.rows.remove(index))
    }

    /// Copy of the ledger with rows that carry no data filtered out; this is
    /// the shape that gets persisted.
    pub fn without_empty_rows(&self) -> MonthlyLedger {
        MonthlyLedger {
            rows: self
                .rows
                .iter()
                .filter(|row| !row.is_empty())
                .cloned()
                .collect(),
        }
    }
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(kind = %value_kind(&other), "ledger rows are not a list; ignoring");
            return Ok(Vec::new());
        }
    };
    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Row>(value) {
            Ok(row) => rows.push(row),
            Err(err) => tracing::warn!(index, error = %err, "skipping unreadable row"),
        }
    }
    Ok(rows)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
