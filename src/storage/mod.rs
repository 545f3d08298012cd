pub mod json_backend;

use std::path::Path;

use crate::{
    core::errors::Result,
    domain::{CategorySet, Ledger},
};

/// Outcome of reading persisted state, including any collections that had to be defaulted.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
}

/// Abstraction over persistence backends that hold the whole ledger as one document.
pub trait StorageBackend: Send + Sync {
    /// Reads the persisted ledger. `presets` seeds the category set when it is absent.
    fn load_snapshot(&self, presets: &CategorySet) -> Result<LoadReport>;

    /// Overwrites the persisted ledger with `ledger`.
    fn save_snapshot(&self, ledger: &Ledger) -> Result<()>;

    /// Filesystem location of the document, when the backend has one.
    fn location(&self) -> Option<&Path> {
        None
    }
}

pub use json_backend::{decode_ledger, JsonStorage};
