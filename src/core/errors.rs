use std::result::Result as StdResult;

use thiserror::Error;

/// Why a record could not be built from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount for `{field}`: `{input}`")]
    InvalidAmount { field: &'static str, input: String },
    #[error("An exchange rate is required when a USD amount is entered")]
    MissingRate,
    #[error("A category is required")]
    MissingCategory,
}

/// Unified error type for the store, storage and engine layers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read ledger data: {0}")]
    StorageRead(String),
    #[error("Failed to write ledger data: {0}")]
    StorageWrite(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("No chart data: {0}")]
    ChartDataUnavailable(String),
    #[error("Export cancelled")]
    ExportAborted,
}

impl LedgerError {
    /// Errors the presentation layer should swallow without telling the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, LedgerError::StorageRead(_) | LedgerError::ExportAborted)
    }
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::StorageWrite(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::StorageWrite(err.to_string())
    }
}
