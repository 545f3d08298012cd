use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::errors::{LedgerError, Result};
use crate::domain::{CategorySet, Displayable, Ledger, Transaction};
use crate::storage::{JsonStorage, StorageBackend};

/// Owns the in-memory ledger and writes it back after every mutation.
///
/// Mutations are applied in memory first. When the following save fails the
/// change is kept, the failure is logged and returned to the caller.
pub struct LedgerStore {
    ledger: Ledger,
    presets: CategorySet,
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    /// Loads the ledger from `storage`. Never fails: unreadable state falls back
    /// to an empty ledger seeded with `presets`.
    pub fn open(storage: Box<dyn StorageBackend>, presets: CategorySet) -> Self {
        let ledger = Self::load(storage.as_ref(), &presets);
        Self {
            ledger,
            presets,
            storage,
        }
    }

    /// Opens the JSON document configured in `config`.
    pub fn open_with_config(manager: &ConfigManager, config: &Config) -> Self {
        let storage = JsonStorage::new(manager.data_path(config));
        Self::open(Box::new(storage), config.presets())
    }

    /// Reads persisted state, logging and degrading instead of failing.
    pub fn load(storage: &dyn StorageBackend, presets: &CategorySet) -> Ledger {
        match storage.load_snapshot(presets) {
            Ok(report) => {
                for warning in &report.warnings {
                    tracing::warn!(%warning, "ledger loaded with defaults");
                }
                tracing::info!(
                    transactions = report.ledger.transactions.len(),
                    categories = report.ledger.categories.len(),
                    "ledger loaded"
                );
                report.ledger
            }
            Err(err) => {
                let location = storage
                    .location()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                if storage.location().is_some_and(|path| !path.exists()) {
                    tracing::debug!(%location, "no ledger document yet, starting empty");
                } else {
                    tracing::warn!(%location, %err, "ledger unreadable, starting empty");
                }
                Ledger::empty(presets.clone())
            }
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn categories(&self) -> &CategorySet {
        &self.ledger.categories
    }

    pub fn presets(&self) -> &CategorySet {
        &self.presets
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    /// Discards in-memory state and reads the backend again.
    pub fn reload(&mut self) {
        self.ledger = Self::load(self.storage.as_ref(), &self.presets);
    }

    /// Writes the whole ledger. An empty category set is replaced by the presets first.
    pub fn save(&mut self) -> Result<()> {
        self.ledger.normalize(&self.presets);
        match self.storage.save_snapshot(&self.ledger) {
            Ok(()) => {
                tracing::info!(
                    transactions = self.ledger.transactions.len(),
                    "ledger saved"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, "failed to save ledger");
                Err(match err {
                    LedgerError::StorageWrite(_) => err,
                    other => LedgerError::StorageWrite(other.to_string()),
                })
            }
        }
    }

    /// Appends a record, registers its category and saves.
    pub fn add(&mut self, record: Transaction) -> Result<Uuid> {
        let id = self.ledger.add_transaction(record);
        self.save()?;
        Ok(id)
    }

    /// Replaces the stored entry that `original` refers to with `replacement`.
    ///
    /// Fails with [`LedgerError::TransactionNotFound`] without touching the
    /// ledger when `original` is not present.
    pub fn update(&mut self, original: &Transaction, replacement: Transaction) -> Result<Uuid> {
        let index = self
            .ledger
            .position_of(original)
            .ok_or_else(|| not_found(original))?;
        let id = self
            .ledger
            .replace_at(index, replacement)
            .ok_or_else(|| not_found(original))?;
        self.save()?;
        Ok(id)
    }

    /// Removes the stored entry that `record` refers to and saves.
    ///
    /// Deleting a record that is not present is a no-op returning `Ok(None)`.
    pub fn delete(&mut self, record: &Transaction) -> Result<Option<Transaction>> {
        let Some(index) = self.ledger.position_of(record) else {
            tracing::debug!(record = %record.display_label(), "delete ignored, record not in ledger");
            return Ok(None);
        };
        let removed = self.ledger.remove_at(index);
        self.save()?;
        Ok(removed)
    }
}

fn not_found(record: &Transaction) -> LedgerError {
    LedgerError::TransactionNotFound(record.display_label())
}
