#![doc(test(attr(deny(warnings))))]

//! FX Ledger keeps a single-user record of income received in Uzbek som and
//! US dollars, with the filtering, totals and persistence a ledger screen needs.

pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::config::{Config, ConfigManager, SortMode};
pub use crate::core::errors::{LedgerError, Result, ValidationError};
pub use crate::core::ledger_store::LedgerStore;
pub use crate::domain::{CategorySet, Ledger, Transaction, TransactionField};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("fx_ledger tracing initialized.");
    });
}
