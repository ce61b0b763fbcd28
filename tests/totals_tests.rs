mod common;

use common::{expense, income};
use expense_core::core::services::{Granularity, SummaryService};
use expense_core::ledger::{EntryType, MonthlyLedger, Row};

fn mixed_rows() -> Vec<Row> {
    vec![
        income("2024-01-01", 1000.0),
        expense("2024-01-05", 0.1),
        expense("2024-01-05", 0.2),
        expense("2024-01-06", 0.3),
        income("2024-01-10", 1e-3),
        expense("2024-01-20", 1234.56),
        expense("2024-01-21", 7.77),
    ]
}

#[test]
fn spending_example_balances() {
    let rows = vec![
        Row::new().with_kind(EntryType::Income).with_amount(1000.0),
        Row::new().with_kind(EntryType::Expense).with_amount(350.5),
    ];
    let totals = SummaryService::compute_totals(&rows);
    assert_eq!(totals.income, 1000.0);
    assert_eq!(totals.expense, 350.5);
    assert_eq!(totals.balance, 649.5);
}

#[test]
fn totals_do_not_depend_on_row_order() {
    let rows = mixed_rows();
    let baseline = SummaryService::compute_totals(&rows);

    let mut reversed = rows.clone();
    reversed.reverse();
    assert_eq!(SummaryService::compute_totals(&reversed), baseline);

    let mut rotated = rows.clone();
    for _ in 0..rows.len() {
        rotated.rotate_left(1);
        assert_eq!(SummaryService::compute_totals(&rotated), baseline);
        let mut swapped = rotated.clone();
        swapped.swap(0, rows.len() - 1);
        assert_eq!(SummaryService::compute_totals(&swapped), baseline);
    }
}

#[test]
fn balance_is_income_minus_expense() {
    let rows = mixed_rows();
    for end in 0..=rows.len() {
        let totals = SummaryService::compute_totals(&rows[..end]);
        assert_eq!(totals.balance, totals.income - totals.expense);
    }
}

#[test]
fn non_numeric_amount_contributes_nothing() {
    let ledger: MonthlyLedger = serde_json::from_str(
        r#"{"rows":[
            {"type":"expense","amount":"abc"},
            {"type":"income","amount":"lots"},
            {"type":"expense","amount":"12.5"}
        ]}"#,
    )
    .unwrap();
    let totals = SummaryService::compute_totals(&ledger.rows);
    assert_eq!(totals.income, 0.0);
    assert_eq!(totals.expense, 12.5);
}

#[test]
fn unset_or_invalid_type_counts_as_income() {
    let ledger: MonthlyLedger = serde_json::from_str(
        r#"{"rows":[{"amount":5},{"type":"transfer","amount":7},{"type":"EXPENSE","amount":2}]}"#,
    )
    .unwrap();
    let totals = SummaryService::compute_totals(&ledger.rows);
    assert_eq!(totals.income, 12.0);
    assert_eq!(totals.expense, 2.0);
}

#[test]
fn day_buckets_are_sparse_and_ordered() {
    let rows = vec![
        expense("2024-01-06", 20.0),
        expense("2024-01-05", 100.0),
        expense("2024-01-05", 50.0),
    ];
    let buckets = SummaryService::bucket_totals(&rows, Granularity::Day);
    let pairs: Vec<(&str, f64)> = buckets
        .iter()
        .map(|bucket| (bucket.key.as_str(), bucket.total))
        .collect();
    assert_eq!(pairs, vec![("2024-01-05", 150.0), ("2024-01-06", 20.0)]);
}

#[test]
fn month_buckets_span_ledgers() {
    let rows = vec![
        expense("2024-02-01", 5.0),
        expense("2023-12-31", 1.0),
        expense("2024-02-28", 5.0),
        Row::new().with_amount(99.0),
    ];
    let buckets = SummaryService::bucket_totals(&rows, Granularity::Month);
    let keys: Vec<&str> = buckets.iter().map(|bucket| bucket.key.as_str()).collect();
    assert_eq!(keys, vec!["2023-12", "2024-02"]);
    assert_eq!(buckets[1].total, 10.0);
}

#[test]
fn chart_plots_spending_with_display_labels() {
    let rows = vec![
        expense("2024-01-05", 100.0),
        income("2024-01-05", 4000.0),
        expense("2024-01-06", 20.0),
    ];
    let series = SummaryService::chart(&rows, Granularity::Day);
    assert_eq!(series.labels, vec!["05/01/2024", "06/01/2024"]);
    assert_eq!(series.values, vec![100.0, 20.0]);

    let monthly = SummaryService::chart(&rows, Granularity::Month);
    assert_eq!(monthly.labels, vec!["01/2024"]);
    assert_eq!(monthly.values, vec![120.0]);
}
