#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use expense_core::{
    ledger::{EntryType, MonthKey, Row},
    storage::{JsonFileStore, MonthStore},
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Month store backed by JSON files under a fresh directory.
pub fn file_store() -> (MonthStore, PathBuf) {
    let base = temp_base();
    let backend = JsonFileStore::new(base.join("store")).expect("create json store");
    (MonthStore::new(Box::new(backend)), base)
}

pub fn month(raw: &str) -> MonthKey {
    raw.parse().expect("valid month")
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

pub fn expense(day: &str, amount: f64) -> Row {
    Row::new()
        .with_date(date(day))
        .with_kind(EntryType::Expense)
        .with_amount(amount)
}

pub fn income(day: &str, amount: f64) -> Row {
    Row::new()
        .with_date(date(day))
        .with_kind(EntryType::Income)
        .with_amount(amount)
}
