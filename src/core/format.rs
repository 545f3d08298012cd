//! Text helpers for totals, record details and clipboard rows.

use crate::core::services::summary_service::LedgerSummary;
use crate::domain::{Transaction, TransactionField};

/// Formats integer totals for presentation.
pub trait AmountFormatter: Send + Sync {
    fn format_total(&self, amount: i64) -> String;
}

/// Groups digits in threes with a configurable separator (`1 255 000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedFormatter {
    pub separator: char,
}

impl GroupedFormatter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for GroupedFormatter {
    fn default() -> Self {
        Self::new(' ')
    }
}

impl AmountFormatter for GroupedFormatter {
    fn format_total(&self, amount: i64) -> String {
        let digits = amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if amount < 0 {
            grouped.push('-');
        }
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(self.separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

/// Renders the totals block shown under the table: the grand total, then one
/// line per category.
pub fn summary_text(summary: &LedgerSummary, formatter: &dyn AmountFormatter) -> String {
    let mut text = format!(
        "TOTAL (all): {} UZS",
        formatter.format_total(summary.grand_total)
    );
    for entry in &summary.by_category {
        text.push('\n');
        text.push_str(&entry.category);
        text.push_str(": ");
        text.push_str(&formatter.format_total(entry.total));
    }
    text
}

/// `Label: value` lines for a record details notice.
pub fn detail_lines(txn: &Transaction) -> Vec<String> {
    TransactionField::ALL
        .into_iter()
        .map(|field| format!("{}: {}", field.label(), txn.field_text(field)))
        .collect()
}

/// Tab-separated row as it appears in the table, with the total grouped.
pub fn clipboard_row(txn: &Transaction, formatter: &dyn AmountFormatter) -> String {
    TransactionField::ALL
        .into_iter()
        .map(|field| match field {
            TransactionField::TotalUzs => formatter.format_total(txn.total_uzs),
            other => txn.field_text(other),
        })
        .collect::<Vec<_>>()
        .join("\t")
}
