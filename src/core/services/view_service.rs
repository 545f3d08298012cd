//! Screen-facing state: the active filter, the sort toggle and the rows on display.

use crate::config::SortMode;
use crate::core::errors::Result;
use crate::domain::{Ledger, Transaction, TransactionField};

use super::export_service::{ExportService, ExportTable};
use super::filter_service::{FilterCriteria, FilterOptions, FilterService, SortState};
use super::summary_service::{ChartData, LedgerSummary, SummaryService};

/// The filtered, optionally sorted projection of a ledger that the table shows.
///
/// Rows are copies; edits go through [`crate::core::ledger_store::LedgerStore`]
/// and the view is refreshed afterwards.
#[derive(Debug, Clone, Default)]
pub struct LedgerView {
    criteria: FilterCriteria,
    sort: SortState,
    rows: Vec<Transaction>,
}

impl LedgerView {
    pub fn new(mode: SortMode) -> Self {
        Self {
            sort: SortState::new(mode),
            ..Self::default()
        }
    }

    /// Re-applies the current criteria to `ledger` in ledger order.
    pub fn refresh(&mut self, ledger: &Ledger) {
        self.rows = FilterService::filter(&ledger.transactions, &self.criteria);
    }

    pub fn apply_filters(&mut self, ledger: &Ledger, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh(ledger);
        tracing::debug!(rows = self.rows.len(), "filters applied");
    }

    /// Clears every criterion and shows the full ledger.
    pub fn reset_filters(&mut self, ledger: &Ledger) {
        self.apply_filters(ledger, FilterCriteria::default());
    }

    /// Sorts the visible rows by `field`, returning whether the sort was descending.
    pub fn sort_by(&mut self, field: TransactionField) -> bool {
        let descending = self.sort.next_direction(field);
        let rows = std::mem::take(&mut self.rows);
        self.rows = FilterService::sort(rows, field, descending);
        descending
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Transaction> {
        self.rows.get(index)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn summary(&self) -> LedgerSummary {
        SummaryService::summarize(&self.rows)
    }

    pub fn chart_data(&self) -> Result<ChartData> {
        SummaryService::chart_data(&self.rows)
    }

    pub fn export_table(&self) -> Option<ExportTable> {
        ExportService::table(&self.rows)
    }

    /// Picker values are drawn from the whole ledger, not the filtered rows.
    pub fn options(&self, ledger: &Ledger) -> FilterOptions {
        FilterService::options(&ledger.transactions, &ledger.categories)
    }
}
