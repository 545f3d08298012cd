//! Hands the current view to a tabular writer.

use std::fmt;

use crate::core::errors::{LedgerError, Result};
use crate::domain::transaction::decimal_text;
use crate::domain::{Transaction, TransactionField};

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Decimal(f64),
    Integer(i64),
}

impl fmt::Display for ExportCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportCell::Text(value) => f.write_str(value),
            ExportCell::Decimal(value) => f.write_str(&decimal_text(*value)),
            ExportCell::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Header row of field keys plus one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Destination chosen by the user (a spreadsheet writer, CSV file, clipboard...).
pub trait ExportSink {
    fn write_table(&mut self, table: &ExportTable) -> Result<()>;
}

pub struct ExportService;

impl ExportService {
    /// Builds the table for `records`; `None` when there is nothing to export.
    pub fn table(records: &[Transaction]) -> Option<ExportTable> {
        if records.is_empty() {
            return None;
        }
        let headers = TransactionField::ALL.iter().map(|field| field.key()).collect();
        let rows = records
            .iter()
            .map(|txn| {
                TransactionField::ALL
                    .iter()
                    .map(|field| cell(txn, *field))
                    .collect()
            })
            .collect();
        Some(ExportTable { headers, rows })
    }

    /// Writes `records` to `sink` and returns the number of rows written.
    ///
    /// An empty view writes nothing and returns `Ok(0)` without consulting the
    /// sink. A missing sink (the user cancelled the destination picker) yields
    /// [`LedgerError::ExportAborted`].
    pub fn export(records: &[Transaction], sink: Option<&mut dyn ExportSink>) -> Result<usize> {
        let Some(table) = Self::table(records) else {
            return Ok(0);
        };
        let sink = sink.ok_or(LedgerError::ExportAborted)?;
        sink.write_table(&table)?;
        tracing::info!(rows = table.len(), "exported view");
        Ok(table.len())
    }
}

fn cell(txn: &Transaction, field: TransactionField) -> ExportCell {
    match field {
        TransactionField::Uzs => ExportCell::Decimal(txn.uzs),
        TransactionField::Usd => ExportCell::Decimal(txn.usd),
        TransactionField::Rate => ExportCell::Decimal(txn.rate),
        TransactionField::TotalUzs => ExportCell::Integer(txn.total_uzs),
        other => ExportCell::Text(txn.field_text(other)),
    }
}
