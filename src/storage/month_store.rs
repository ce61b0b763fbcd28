use serde_json::{Map, Value};

use crate::errors::LedgerError;
use crate::ledger::{MonthKey, MonthlyLedger};

use super::{KeyValueStore, Result};

/// Storage key under which the whole month document lives.
pub const DEFAULT_STORAGE_KEY: &str = "planilha_financeira_mes";

type Document = Map<String, Value>;

/// Durable mapping from month key to ledger, kept as one JSON document
/// (`{ "YYYY-MM": { "rows": [...] } }`) in a [`KeyValueStore`].
///
/// Every write re-reads and rewrites the whole document. Writers are exclusive
/// per `MonthStore` through `&mut self`; separate stores sharing one backend
/// race with last-write-wins semantics.
pub struct MonthStore {
    backend: Box<dyn KeyValueStore>,
    storage_key: String,
}

impl MonthStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_storage_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            storage_key: key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns the stored ledger for `month`, or an empty one. Never fails:
    /// unreadable storage behaves like an empty store.
    pub fn load(&self, month: &MonthKey) -> MonthlyLedger {
        let mut document = self.read_document();
        let Some(entry) = document.remove(&month.to_string()) else {
            return MonthlyLedger::new();
        };
        match serde_json::from_value::<MonthlyLedger>(entry) {
            Ok(ledger) => {
                tracing::debug!(%month, rows = ledger.len(), "loaded month");
                ledger
            }
            Err(err) => {
                tracing::warn!(%month, error = %err, "month entry unreadable; using empty ledger");
                MonthlyLedger::new()
            }
        }
    }

    /// Replaces everything stored for `month` with `ledger`.
    pub fn save(&mut self, month: &MonthKey, ledger: &MonthlyLedger) -> Result<()> {
        let mut document = self.read_document();
        document.insert(month.to_string(), serde_json::to_value(ledger)?);
        self.write_document(&document)?;
        tracing::debug!(%month, rows = ledger.len(), "saved month");
        Ok(())
    }

    /// Removes the entry for `month`; later loads see an empty ledger.
    pub fn clear(&mut self, month: &MonthKey) -> Result<()> {
        let mut document = self.read_document();
        let existed = document.remove(&month.to_string()).is_some();
        self.write_document(&document)?;
        tracing::debug!(%month, existed, "cleared month");
        Ok(())
    }

    /// Months present in the store, oldest first. Keys that are not valid
    /// month identifiers are ignored.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self
            .read_document()
            .keys()
            .filter_map(|key| key.parse().ok())
            .collect();
        months.sort();
        months
    }

    fn read_document(&self) -> Document {
        let raw = match self.backend.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Document::new(),
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "store unreadable; treating as empty");
                return Document::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                tracing::warn!(key = %self.storage_key, "store document is not an object; treating as empty");
                Document::new()
            }
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "store document corrupted; treating as empty");
                Document::new()
            }
        }
    }

    fn write_document(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_string(document)?;
        self.backend
            .set(&self.storage_key, &json)
            .map_err(|err| match err {
                LedgerError::Io(io) => LedgerError::Storage(format!(
                    "unable to write `{}`: {}",
                    self.storage_key, io
                )),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntryType, Row};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn month(raw: &str) -> MonthKey {
        raw.parse().unwrap()
    }

    fn sample_ledger(description: &str, amount: f64) -> MonthlyLedger {
        MonthlyLedger::with_rows(vec![Row::new()
            .with_description(description)
            .with_kind(EntryType::Expense)
            .with_amount(amount)])
    }

    #[test]
    fn fresh_store_loads_empty_ledger() {
        let store = MonthStore::new(Box::new(MemoryStore::new()));
        assert_eq!(store.load(&month("2099-12")), MonthlyLedger::new());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MonthStore::new(Box::new(MemoryStore::new()));
        let ledger = sample_ledger("Rent", 1500.0);
        store.save(&month("2024-01"), &ledger).unwrap();
        assert_eq!(store.load(&month("2024-01")), ledger);
    }

    #[test]
    fn unrelated_entries_are_preserved_verbatim() {
        let raw = r#"{"notes":{"anything":true},"2024-02":{"rows":[],"extra":1}}"#;
        let backend = Arc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw));
        let mut store = MonthStore::new(Box::new(Arc::clone(&backend)));
        store
            .save(&month("2024-01"), &sample_ledger("Bus", 4.4))
            .unwrap();

        let written: Value =
            serde_json::from_str(&backend.get(DEFAULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(written["notes"]["anything"], Value::Bool(true));
        assert_eq!(written["2024-02"]["extra"], Value::from(1));
    }

    #[test]
    fn non_object_document_degrades_to_empty() {
        let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "[1,2,3]");
        let store = MonthStore::new(Box::new(backend));
        assert!(store.load(&month("2024-01")).is_empty());
        assert!(store.months().is_empty());
    }

    #[test]
    fn months_are_listed_in_order_and_invalid_keys_skipped() {
        let mut store = MonthStore::new(Box::new(MemoryStore::new()));
        for key in ["2024-03", "2023-11", "2024-01"] {
            store.save(&month(key), &MonthlyLedger::new()).unwrap();
        }
        let listed: Vec<String> = store.months().iter().map(ToString::to_string).collect();
        assert_eq!(listed, vec!["2023-11", "2024-01", "2024-03"]);
    }

    #[test]
    fn custom_storage_key_is_used() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = MonthStore::with_storage_key(Box::new(Arc::clone(&backend)), "other");
        store
            .save(&month("2024-05"), &sample_ledger("Gas", 80.0))
            .unwrap();
        assert!(backend.get("other").unwrap().is_some());
        assert!(backend.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
