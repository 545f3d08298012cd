//! The set of known category labels.

use serde::{Deserialize, Serialize};

/// Categories seeded into every new ledger.
pub const PRESET_CATEGORIES: [&str; 5] = [
    "На карту (Шаяна)",
    "Нал от Шаяны (USD)",
    "Нал от Шаяны (UZS)",
    "На карту (Кайзер)",
    "Премия / Подарок",
];

/// Distinct category names in first-seen order.
///
/// The set only grows: names are appended when a saved record introduces them
/// and are never pruned automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in preset list.
    pub fn presets() -> Self {
        Self::from_names(PRESET_CATEGORIES)
    }

    /// Builds a set from names, dropping duplicates while keeping first-seen order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Appends `name` unless it is already known. Returns `true` when it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexical order, as offered by the category filter picker.
    pub fn sorted(&self) -> Vec<String> {
        let mut names = self.names.clone();
        names.sort();
        names
    }

    /// First category (in set order) whose name contains any of `markers`.
    pub fn first_matching<S: AsRef<str>>(&self, markers: &[S]) -> Option<&str> {
        self.iter().find(|name| {
            markers
                .iter()
                .map(AsRef::as_ref)
                .filter(|marker| !marker.is_empty())
                .any(|marker| name.contains(marker))
        })
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.names
    }
}
