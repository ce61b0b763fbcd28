use std::collections::BTreeMap;

use serde::Serialize;

use crate::currency::{format_day_label, format_month_label};
use crate::ledger::{EntryType, LedgerEntry, MonthKey};

/// Income, expense and balance derived from a row sequence. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Time resolution used when bucketing rows for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Month,
}

impl Granularity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "dia" => Some(Granularity::Day),
            "month" | "mes" | "mês" => Some(Granularity::Month),
            _ => None,
        }
    }
}

/// Sum of amounts sharing one day (`YYYY-MM-DD`) or month (`YYYY-MM`) key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: String,
    pub total: f64,
}

/// Labelled values ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_buckets(buckets: &[Bucket], granularity: Granularity) -> Self {
        let title = match granularity {
            Granularity::Day => "Spending per day",
            Granularity::Month => "Spending per month",
        };
        Self {
            title: title.to_string(),
            labels: buckets
                .iter()
                .map(|bucket| bucket_label(&bucket.key, granularity))
                .collect(),
            values: buckets.iter().map(|bucket| bucket.total).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn bucket_label(key: &str, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => crate::ledger::parse_date(key)
            .map(format_day_label)
            .unwrap_or_else(|| key.to_string()),
        Granularity::Month => key
            .parse::<MonthKey>()
            .map(|month| format_month_label(&month))
            .unwrap_or_else(|_| key.to_string()),
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Computes income/expense/balance. Rows typed `expense` add to expense,
    /// every other row adds to income; malformed amounts contribute nothing.
    pub fn compute_totals<E: LedgerEntry>(rows: &[E]) -> Totals {
        let mut income = Vec::new();
        let mut expense = Vec::new();
        for row in rows {
            let value = row.amount_value();
            if value == 0.0 {
                continue;
            }
            match row.entry_type() {
                EntryType::Expense => expense.push(value),
                EntryType::Income => income.push(value),
            }
        }
        let income = stable_sum(income);
        let expense = stable_sum(expense);
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Sparse, chronologically ordered per-day or per-month sums of every
    /// dated row.
    pub fn bucket_totals<E: LedgerEntry>(rows: &[E], granularity: Granularity) -> Vec<Bucket> {
        Self::collect_buckets(rows.iter(), granularity)
    }

    /// Same as [`SummaryService::bucket_totals`], restricted to one entry type.
    pub fn bucket_totals_for<E: LedgerEntry>(
        rows: &[E],
        granularity: Granularity,
        kind: EntryType,
    ) -> Vec<Bucket> {
        Self::collect_buckets(
            rows.iter().filter(|row| row.entry_type() == kind),
            granularity,
        )
    }

    pub fn chart<E: LedgerEntry>(rows: &[E], granularity: Granularity) -> ChartSeries {
        let buckets = Self::bucket_totals_for(rows, granularity, EntryType::Expense);
        ChartSeries::from_buckets(&buckets, granularity)
    }

    fn collect_buckets<'a, E, I>(rows: I, granularity: Granularity) -> Vec<Bucket>
    where
        E: LedgerEntry + 'a,
        I: Iterator<Item = &'a E>,
    {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for row in rows {
            let Some(date) = row.entry_date() else {
                continue;
            };
            let key = match granularity {
                Granularity::Day => date.format("%Y-%m-%d").to_string(),
                Granularity::Month => MonthKey::from_date(date).to_string(),
            };
            groups.entry(key).or_default().push(row.amount_value());
        }
        groups
            .into_iter()
            .map(|(key, values)| Bucket {
                key,
                total: stable_sum(values),
            })
            .collect()
    }
}

// Summing in sorted order makes the result independent of input order, down
// to the last bit.
fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}
