//! Aggregation helpers for totals and chart series.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::core::errors::{LedgerError, Result};
use crate::domain::Transaction;

const MONTH_LABEL_FORMAT: &str = "%Y-%m";

/// Sum of `total_uzs` for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Grand total plus per-category subtotals for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub grand_total: i64,
    /// First-seen category order.
    pub by_category: Vec<CategoryTotal>,
}

/// Series handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    /// Every calendar month from the earliest to the latest dated record, gaps zero-filled.
    pub by_month: Vec<(String, i64)>,
    /// Category totals in lexical order.
    pub by_category: Vec<(String, i64)>,
}

/// Pure aggregation over an immutable record slice.
///
/// Sums saturate at the `i64` bounds instead of overflowing.
pub struct SummaryService;

impl SummaryService {
    /// Sum of `total_uzs`; zero for an empty slice.
    pub fn grand_total(records: &[Transaction]) -> i64 {
        records
            .iter()
            .fold(0, |total, txn| accumulate(total, txn.total_uzs))
    }

    /// Per-category sums in first-seen order. Categories without records are omitted.
    pub fn totals_by_category(records: &[Transaction]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for txn in records {
            match totals.iter_mut().find(|entry| entry.category == txn.category) {
                Some(entry) => entry.total = accumulate(entry.total, txn.total_uzs),
                None => totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    total: txn.total_uzs,
                }),
            }
        }
        totals
    }

    /// Per-month sums keyed by `YYYY-MM`, in chronological order.
    ///
    /// Records whose date does not parse are left out of this aggregation only.
    pub fn totals_by_month(records: &[Transaction]) -> BTreeMap<String, i64> {
        let mut totals = BTreeMap::new();
        for (month, txn) in dated(records) {
            let total = totals
                .entry(month.format(MONTH_LABEL_FORMAT).to_string())
                .or_insert(0);
            *total = accumulate(*total, txn.total_uzs);
        }
        totals
    }

    pub fn summarize(records: &[Transaction]) -> LedgerSummary {
        LedgerSummary {
            grand_total: Self::grand_total(records),
            by_category: Self::totals_by_category(records),
        }
    }

    /// Builds both chart series for a view.
    ///
    /// Fails with [`LedgerError::ChartDataUnavailable`] when the view is empty or
    /// none of its records carries a parseable date.
    pub fn chart_data(records: &[Transaction]) -> Result<ChartData> {
        if records.is_empty() {
            return Err(LedgerError::ChartDataUnavailable(
                "there are no records to chart".into(),
            ));
        }
        let dated: Vec<(NaiveDate, &Transaction)> = dated(records).collect();
        let (Some(first), Some(last)) = (
            dated.iter().map(|(month, _)| *month).min(),
            dated.iter().map(|(month, _)| *month).max(),
        ) else {
            return Err(LedgerError::ChartDataUnavailable(
                "no record has a valid date".into(),
            ));
        };

        let mut monthly: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut cursor = first;
        loop {
            monthly.insert(cursor, 0);
            match next_month(cursor) {
                Some(next) if next <= last => cursor = next,
                _ => break,
            }
        }
        for (month, txn) in &dated {
            let total = monthly.entry(*month).or_insert(0);
            *total = accumulate(*total, txn.total_uzs);
        }

        let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
        for (_, txn) in &dated {
            let total = by_category.entry(txn.category.clone()).or_insert(0);
            *total = accumulate(*total, txn.total_uzs);
        }

        Ok(ChartData {
            by_month: monthly
                .into_iter()
                .map(|(month, total)| (month.format(MONTH_LABEL_FORMAT).to_string(), total))
                .collect(),
            by_category: by_category.into_iter().collect(),
        })
    }
}

/// Records with a parseable date, paired with the first day of their month.
fn dated(records: &[Transaction]) -> impl Iterator<Item = (NaiveDate, &Transaction)> {
    records.iter().filter_map(|txn| {
        let date = txn.parsed_date()?;
        Some((date.with_day(1)?, txn))
    })
}

fn accumulate(total: i64, amount: i64) -> i64 {
    total.saturating_add(amount)
}

fn next_month(month_start: NaiveDate) -> Option<NaiveDate> {
    month_start.checked_add_months(Months::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, total: f64, category: &str) -> Transaction {
        Transaction::new(date, total, 0.0, 0.0, category, "")
    }

    #[test]
    fn category_totals_keep_first_seen_order() {
        let records = vec![
            record("2024-01-01", 10.0, "B"),
            record("2024-01-02", 5.0, "A"),
            record("2024-01-03", 1.0, "B"),
        ];
        let totals = SummaryService::totals_by_category(&records);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "B".into(),
                    total: 11
                },
                CategoryTotal {
                    category: "A".into(),
                    total: 5
                },
            ]
        );
    }

    #[test]
    fn empty_input_has_zero_total() {
        assert_eq!(SummaryService::grand_total(&[]), 0);
        assert!(SummaryService::totals_by_category(&[]).is_empty());
        assert!(SummaryService::totals_by_month(&[]).is_empty());
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let half = i64::MAX / 2 + 1;
        let mut records = vec![
            record("2024-01-01", 0.0, "A"),
            record("2024-01-02", 0.0, "A"),
        ];
        for txn in &mut records {
            txn.total_uzs = half;
        }

        assert_eq!(SummaryService::grand_total(&records), i64::MAX);
        assert_eq!(SummaryService::totals_by_category(&records)[0].total, i64::MAX);
        assert_eq!(SummaryService::totals_by_month(&records)["2024-01"], i64::MAX);

        let chart = SummaryService::chart_data(&records).unwrap();
        assert_eq!(chart.by_month, vec![("2024-01".to_string(), i64::MAX)]);
        assert_eq!(chart.by_category, vec![("A".to_string(), i64::MAX)]);

        for txn in &mut records {
            txn.total_uzs = -half;
        }
        assert_eq!(SummaryService::grand_total(&records), i64::MIN);
    }

    #[test]
    fn chart_months_fill_gaps_between_first_and_last() {
        let records = vec![
            record("2024-03-05", 7.0, "B"),
            record("2023-12-31", 3.0, "A"),
            record("not-a-date", 100.0, "C"),
        ];
        let chart = SummaryService::chart_data(&records).unwrap();
        assert_eq!(
            chart.by_month,
            vec![
                ("2023-12".to_string(), 3),
                ("2024-01".to_string(), 0),
                ("2024-02".to_string(), 0),
                ("2024-03".to_string(), 7),
            ]
        );
        assert_eq!(
            chart.by_category,
            vec![("A".to_string(), 3), ("B".to_string(), 7)]
        );
    }

    #[test]
    fn chart_is_unavailable_without_dated_records() {
        let err = SummaryService::chart_data(&[]).unwrap_err();
        assert!(matches!(err, LedgerError::ChartDataUnavailable(_)));

        let undated = vec![record("someday", 1.0, "A")];
        let err = SummaryService::chart_data(&undated).unwrap_err();
        assert!(matches!(err, LedgerError::ChartDataUnavailable(_)));
    }
}
