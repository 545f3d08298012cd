use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer, Value};

use crate::{
    core::{
        errors::{LedgerError, Result},
        utils::replace_file,
    },
    domain::{CategorySet, Ledger, Transaction},
};

use super::{LoadReport, StorageBackend};

const INDENT: &[u8] = b"    ";
const TRANSACTIONS_KEY: &str = "transactions";
const CATEGORIES_KEY: &str = "categories";

/// Single-file JSON persistence: `{"transactions": [...], "categories": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load_snapshot(&self, presets: &CategorySet) -> Result<LoadReport> {
        if !self.path.exists() {
            return Err(LedgerError::StorageRead(format!(
                "`{}` does not exist",
                self.path.display()
            )));
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|err| LedgerError::StorageRead(err.to_string()))?;
        decode_ledger(&data, presets)
    }

    fn save_snapshot(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Decodes a ledger document, defaulting each collection independently.
///
/// A document that is not valid JSON is a read failure. A missing or malformed
/// `transactions` key yields an empty list; a missing or malformed `categories`
/// key yields `presets`. Each malformed key adds a warning to the report.
pub fn decode_ledger(data: &str, presets: &CategorySet) -> Result<LoadReport> {
    let root: Value =
        serde_json::from_str(data).map_err(|err| LedgerError::StorageRead(err.to_string()))?;
    let mut warnings = Vec::new();
    let Value::Object(mut root) = root else {
        warnings.push("ledger document is not a JSON object".to_string());
        return Ok(LoadReport {
            ledger: Ledger::empty(presets.clone()),
            warnings,
        });
    };

    let transactions: Vec<Transaction> =
        decode_key(root.remove(TRANSACTIONS_KEY), TRANSACTIONS_KEY, &mut warnings)
            .unwrap_or_default();
    let categories: CategorySet =
        decode_key(root.remove(CATEGORIES_KEY), CATEGORIES_KEY, &mut warnings)
            .unwrap_or_else(|| presets.clone());

    Ok(LoadReport {
        ledger: Ledger::new(transactions, categories),
        warnings,
    })
}

fn decode_key<T: DeserializeOwned>(
    value: Option<Value>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match serde_json::from_value(value?) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warnings.push(format!("`{key}` could not be read: {err}"));
            None
        }
    }
}

/// Encodes the ledger as four-space indented JSON, keeping non-ASCII text as-is.
pub fn encode_ledger(ledger: &Ledger) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    ledger.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| LedgerError::StorageWrite(err.to_string()))
}

/// Writes the ledger to `path` by staging to a sibling temporary file and renaming it.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = encode_ledger(ledger)?;
    replace_file(path, &json)
}
