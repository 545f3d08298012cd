//! Turns raw dialog input into a validated [`Transaction`].

use chrono::Local;

use crate::core::errors::ValidationError;
use crate::domain::transaction::{checked_total, decimal_text, DATE_FORMAT};
use crate::domain::{CategorySet, Transaction};

/// Field values exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: String,
    pub uzs: String,
    pub usd: String,
    pub rate: String,
    pub category: String,
    pub comment: String,
}

impl TransactionDraft {
    /// Blank draft dated today.
    pub fn today() -> Self {
        Self {
            date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Pre-fills a draft from an existing record for editing.
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.date.clone(),
            uzs: decimal_text(txn.uzs),
            usd: decimal_text(txn.usd),
            rate: decimal_text(txn.rate),
            category: txn.category.clone(),
            comment: txn.comment.clone(),
        }
    }
}

/// Validates drafts against the known categories and the USD marker list.
pub struct TransactionBuilder<'a> {
    categories: &'a CategorySet,
    markers: &'a [String],
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(categories: &'a CategorySet, markers: &'a [String]) -> Self {
        Self {
            categories,
            markers,
        }
    }

    /// Category to pre-select for a draft with a positive USD amount and no
    /// category yet: the first known category containing one of the markers.
    pub fn suggest_category(&self, draft: &TransactionDraft) -> Option<String> {
        if !draft.category.trim().is_empty() {
            return None;
        }
        let usd = parse_amount("usd", &draft.usd).ok()?;
        if usd > 0.0 {
            self.categories
                .first_matching(self.markers)
                .map(str::to_string)
        } else {
            None
        }
    }

    /// Validates `draft` and builds the record, deriving `total_uzs`.
    ///
    /// No record is produced on failure.
    pub fn build(&self, draft: &TransactionDraft) -> Result<Transaction, ValidationError> {
        let result = self.try_build(draft);
        if let Err(err) = &result {
            tracing::debug!(%err, "rejected transaction draft");
        }
        result
    }

    fn try_build(&self, draft: &TransactionDraft) -> Result<Transaction, ValidationError> {
        let uzs = parse_amount("uzs", &draft.uzs)?;
        let usd = parse_amount("usd", &draft.usd)?;
        let rate = parse_amount("rate", &draft.rate)?;
        if usd > 0.0 && rate == 0.0 {
            return Err(ValidationError::MissingRate);
        }
        if checked_total(usd, rate, uzs).is_none() {
            return Err(ValidationError::InvalidAmount {
                field: "total_uzs",
                input: format!(
                    "{} * {} + {}",
                    draft.usd.trim(),
                    draft.rate.trim(),
                    draft.uzs.trim()
                ),
            });
        }

        let mut category = draft.category.trim().to_string();
        if category.is_empty() {
            category = self.suggest_category(draft).unwrap_or_default();
        }
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        let date = match draft.date.trim() {
            "" => Local::now().date_naive().format(DATE_FORMAT).to_string(),
            value => value.to_string(),
        };

        Ok(Transaction::new(
            date,
            uzs,
            usd,
            rate,
            category,
            draft.comment.trim(),
        ))
    }
}

/// Parses a decimal amount. Blank input is zero; anything non-numeric or non-finite
/// is rejected.
pub fn parse_amount(field: &'static str, input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidAmount {
            field,
            input: input.to_string(),
        })
}
