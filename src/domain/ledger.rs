//! The ledger aggregate: every recorded transaction plus the known categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{category::CategorySet, transaction::Transaction};

/// Full ordered record list (insertion order) and the category set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "CategorySet::presets")]
    pub categories: CategorySet,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::empty(CategorySet::presets())
    }
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, categories: CategorySet) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// A ledger with no records and the supplied category seed.
    pub fn empty(categories: CategorySet) -> Self {
        Self::new(Vec::new(), categories)
    }

    /// Appends a record and registers its category. Returns the record id.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.register_category(&transaction.category);
        self.transactions.push(transaction);
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Resolves a (possibly copied) record back to its index in the ledger.
    ///
    /// The in-memory id is tried first; a record that carries an unknown id falls
    /// back to the first structurally equal entry.
    pub fn position_of(&self, record: &Transaction) -> Option<usize> {
        self.transactions
            .iter()
            .position(|txn| txn.same_record(record))
            .or_else(|| self.transactions.iter().position(|txn| txn == record))
    }

    /// Replaces the entry at `index`, keeping that entry's id.
    pub fn replace_at(&mut self, index: usize, mut replacement: Transaction) -> Option<Uuid> {
        let slot = self.transactions.get_mut(index)?;
        replacement.id = slot.id;
        let id = replacement.id;
        let category = replacement.category.clone();
        *slot = replacement;
        self.register_category(&category);
        Some(id)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Transaction> {
        if index < self.transactions.len() {
            Some(self.transactions.remove(index))
        } else {
            None
        }
    }

    /// Fills an empty category set with `presets` before the ledger is written.
    pub fn normalize(&mut self, presets: &CategorySet) {
        if self.categories.is_empty() {
            self.categories = presets.clone();
        }
    }

    fn register_category(&mut self, name: &str) {
        if !name.is_empty() {
            self.categories.insert(name);
        }
    }
}
