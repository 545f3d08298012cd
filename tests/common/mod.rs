#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use fx_ledger::{
    config::{Config, ConfigManager},
    core::ledger_store::LedgerStore,
    domain::Transaction,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated store and config manager backed by a unique directory.
pub fn setup_test_env() -> (LedgerStore, ConfigManager) {
    let config_manager = ConfigManager::with_base_dir(temp_base());
    let store = LedgerStore::open_with_config(&config_manager, &Config::default());
    (store, config_manager)
}

pub fn uzs(date: &str, amount: f64, category: &str) -> Transaction {
    Transaction::new(date, amount, 0.0, 0.0, category, "")
}
