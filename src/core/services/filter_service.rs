//! Filtering and sorting of ledger records into display views.

use std::collections::{BTreeSet, HashMap};

use crate::config::SortMode;
use crate::domain::{CategorySet, Transaction, TransactionField};

/// Year, month and category criteria. Unset or empty criteria match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: Option<String>,
    pub month: Option<String>,
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// `true` when no criterion would restrict the view.
    pub fn is_empty(&self) -> bool {
        active(&self.year).is_none()
            && active(&self.month).is_none()
            && active(&self.category).is_none()
    }

    /// Year is a prefix of `date`, month equals the two month characters of
    /// `date`, category is an exact match. All set criteria must hold.
    pub fn matches(&self, txn: &Transaction) -> bool {
        active(&self.year).map_or(true, |year| txn.date.starts_with(year))
            && active(&self.month).map_or(true, |month| txn.month_key() == month)
            && active(&self.category).map_or(true, |category| txn.category == category)
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|value| !value.is_empty())
}

/// Distinct values offered by the filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Newest first.
    pub years: Vec<String>,
    /// Ascending.
    pub months: Vec<String>,
    /// Lexical order.
    pub categories: Vec<String>,
}

/// Tracks which direction the next sort request should use.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    mode: SortMode,
    descending: bool,
    per_column: HashMap<TransactionField, bool>,
}

impl SortState {
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    /// Returns whether a sort on `field` should be descending, then flips the
    /// stored direction. In [`SortMode::Shared`] one flag serves every column,
    /// so clicking a different column continues the alternation.
    pub fn next_direction(&mut self, field: TransactionField) -> bool {
        let slot = match self.mode {
            SortMode::Shared => &mut self.descending,
            SortMode::PerColumn => self.per_column.entry(field).or_insert(false),
        };
        let descending = *slot;
        *slot = !descending;
        descending
    }

    pub fn reset(&mut self) {
        self.descending = false;
        self.per_column.clear();
    }
}

/// Stateless filter and sort operations. Inputs are never mutated.
pub struct FilterService;

impl FilterService {
    /// Returns the records matching `criteria`, in their original order.
    pub fn filter(records: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
        records
            .iter()
            .filter(|txn| criteria.matches(txn))
            .cloned()
            .collect()
    }

    /// Stable sort by the string form of `field`. Equal keys keep their relative
    /// order in both directions.
    pub fn sort(
        records: Vec<Transaction>,
        field: TransactionField,
        descending: bool,
    ) -> Vec<Transaction> {
        let mut keyed: Vec<(String, Transaction)> = records
            .into_iter()
            .map(|txn| (txn.field_text(field), txn))
            .collect();
        if descending {
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
        } else {
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        keyed.into_iter().map(|(_, txn)| txn).collect()
    }

    /// Collects picker values from the full record list and the category set.
    pub fn options(records: &[Transaction], categories: &CategorySet) -> FilterOptions {
        let years: BTreeSet<String> = records.iter().map(Transaction::year_key).collect();
        let months: BTreeSet<String> = records.iter().map(Transaction::month_key).collect();
        FilterOptions {
            years: years.into_iter().rev().collect(),
            months: months.into_iter().collect(),
            categories: categories.sorted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, uzs: f64, category: &str) -> Transaction {
        Transaction::new(date, uzs, 0.0, 0.0, category, "")
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let criteria = FilterCriteria::new()
            .with_year("")
            .with_month("")
            .with_category("");
        assert!(criteria.is_empty());
        assert!(criteria.matches(&record("1999-12-31", 1.0, "Any")));
    }

    #[test]
    fn shared_toggle_alternates_across_columns() {
        let mut state = SortState::new(SortMode::Shared);
        assert!(!state.next_direction(TransactionField::Date));
        assert!(state.next_direction(TransactionField::Category));
        assert!(!state.next_direction(TransactionField::Category));
    }

    #[test]
    fn per_column_toggle_remembers_each_column() {
        let mut state = SortState::new(SortMode::PerColumn);
        assert!(!state.next_direction(TransactionField::Date));
        assert!(!state.next_direction(TransactionField::Category));
        assert!(state.next_direction(TransactionField::Date));
        state.reset();
        assert!(!state.next_direction(TransactionField::Date));
    }

    #[test]
    fn options_are_distinct_and_ordered() {
        let records = vec![
            record("2023-05-01", 1.0, "A"),
            record("2024-02-01", 1.0, "B"),
            record("2024-01-01", 1.0, "A"),
        ];
        let options = FilterService::options(&records, &CategorySet::from_names(["B", "A"]));
        assert_eq!(options.years, vec!["2024", "2023"]);
        assert_eq!(options.months, vec!["01", "02", "05"]);
        assert_eq!(options.categories, vec!["A", "B"]);
    }
}
