//! Pure domain models for the cash ledger: records, categories and the ledger aggregate.
//! No I/O and no presentation concerns live here.

pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::{CategorySet, PRESET_CATEGORIES};
pub use common::{Displayable, Identifiable};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionField};
