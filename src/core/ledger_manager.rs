use crate::core::services::{
    ChartSeries, Granularity, RowPatch, RowService, ServiceResult, SummaryService, Totals,
};
use crate::ledger::{MonthKey, MonthlyLedger, Row, RowId};
use crate::storage::{import_legacy_expenses, ImportReport, LegacyExpense, MonthStore};

/// Controller that owns the active month and its working rows.
///
/// Every edit updates the working copy and then writes through to the
/// [`MonthStore`]. Rows that carry no data stay in the working copy but are
/// filtered out of what gets persisted. When the write fails the edit is
/// rolled back, so the working copy never runs ahead of the store.
pub struct LedgerManager {
    store: MonthStore,
    month: MonthKey,
    working: MonthlyLedger,
}

impl LedgerManager {
    /// Opens `month` from `store`.
    pub fn new(store: MonthStore, month: MonthKey) -> Self {
        let working = store.load(&month);
        tracing::info!(%month, rows = working.len(), "ledger opened");
        Self {
            store,
            month,
            working,
        }
    }

    /// Opens the month containing today's date.
    pub fn for_current_month(store: MonthStore) -> Self {
        Self::new(store, MonthKey::current())
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn rows(&self) -> &[Row] {
        &self.working.rows
    }

    pub fn ledger(&self) -> &MonthlyLedger {
        &self.working
    }

    /// Id of the row at `position` (zero-based) in display order.
    pub fn row_id_at(&self, position: usize) -> Option<RowId> {
        self.working.rows.get(position).map(|row| row.id.clone())
    }

    /// Switches to `month`, discarding unsaved blank rows of the previous one.
    pub fn open_month(&mut self, month: MonthKey) -> &MonthlyLedger {
        self.working = self.store.load(&month);
        self.month = month;
        tracing::debug!(%month, rows = self.working.len(), "switched month");
        &self.working
    }

    pub fn next_month(&mut self) -> &MonthlyLedger {
        self.open_month(self.month.next())
    }

    pub fn previous_month(&mut self) -> &MonthlyLedger {
        self.open_month(self.month.previous())
    }

    /// Appends `row` to the working copy and persists the month.
    pub fn add_row(&mut self, row: Row) -> ServiceResult<RowId> {
        let previous = self.working.clone();
        let id = RowService::add(&mut self.working, row)?;
        self.commit(previous, id)
    }

    /// Appends a fresh blank expense row. It is kept in memory only until an
    /// edit gives it content.
    pub fn add_blank_row(&mut self) -> RowId {
        self.working.add_row(Row::new())
    }

    pub fn update_row(&mut self, id: &RowId, patch: RowPatch) -> ServiceResult<()> {
        let previous = self.working.clone();
        RowService::update(&mut self.working, id, patch)?;
        self.commit(previous, ())
    }

    pub fn delete_row(&mut self, id: &RowId) -> ServiceResult<Row> {
        let previous = self.working.clone();
        let removed = RowService::remove(&mut self.working, id)?;
        self.commit(previous, removed)
    }

    /// Drops every row of the active month, including the stored entry.
    pub fn clear_month(&mut self) -> ServiceResult<()> {
        self.store.clear(&self.month)?;
        self.working = MonthlyLedger::new();
        tracing::info!(month = %self.month, "month cleared");
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        SummaryService::compute_totals(&self.working.rows)
    }

    pub fn chart(&self, granularity: Granularity) -> ChartSeries {
        SummaryService::chart(&self.working.rows, granularity)
    }

    /// Months present in the store, oldest first.
    pub fn months(&self) -> Vec<MonthKey> {
        self.store.months()
    }

    /// Imports single-list entries into the store and refreshes the working
    /// copy when the active month received rows.
    pub fn import_legacy(&mut self, expenses: Vec<LegacyExpense>) -> ServiceResult<ImportReport> {
        let report = import_legacy_expenses(&mut self.store, expenses)?;
        if report.months.contains(&self.month) {
            let blanks: Vec<Row> = self
                .working
                .rows
                .iter()
                .filter(|row| row.is_empty())
                .cloned()
                .collect();
            self.working = self.store.load(&self.month);
            self.working.rows.extend(blanks);
        }
        Ok(report)
    }

    fn commit<T>(&mut self, previous: MonthlyLedger, value: T) -> ServiceResult<T> {
        if let Err(err) = self.persist() {
            tracing::warn!(month = %self.month, error = %err, "write failed; edit rolled back");
            self.working = previous;
            return Err(err);
        }
        Ok(value)
    }

    /// Writes the non-empty working rows under the active month.
    pub fn persist(&mut self) -> ServiceResult<()> {
        let snapshot = self.working.without_empty_rows();
        self.store.save(&self.month, &snapshot)?;
        tracing::debug!(month = %self.month, rows = snapshot.len(), "month persisted");
        Ok(())
    }
}
