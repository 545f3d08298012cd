//! Domain model for a single cash transaction recorded in two currencies.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::{char_slice, Displayable, Identifiable};

/// Calendar format used for the `date` field in the ledger file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One ledger entry: local and foreign amounts, the exchange rate and the derived total.
///
/// `id` is assigned in memory when the record is created or loaded and is never
/// written to the ledger file. Equality (`==`) compares the seven persisted
/// fields only, so two records loaded from the same JSON compare equal even
/// though their ids differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: String,
    #[serde(default)]
    pub uzs: f64,
    #[serde(default)]
    pub usd: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(deserialize_with = "deserialize_total")]
    pub total_uzs: i64,
    pub category: String,
    #[serde(default)]
    pub comment: String,
}

impl Transaction {
    /// Creates a record and derives `total_uzs` from the amounts.
    pub fn new(
        date: impl Into<String>,
        uzs: f64,
        usd: f64,
        rate: f64,
        category: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            uzs,
            usd,
            rate,
            total_uzs: compute_total(usd, rate, uzs),
            category: category.into(),
            comment: comment.into(),
        }
    }

    /// Parses `date` as an ISO calendar date, `None` when it is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// The year key used by filter pickers (first four characters of `date`).
    pub fn year_key(&self) -> String {
        char_slice(&self.date, 0, 4)
    }

    /// The month key used by filter pickers (characters six and seven of `date`).
    pub fn month_key(&self) -> String {
        char_slice(&self.date, 5, 7)
    }

    /// String form of a field, used as the sort key and for tabular output.
    pub fn field_text(&self, field: TransactionField) -> String {
        match field {
            TransactionField::Date => self.date.clone(),
            TransactionField::Uzs => decimal_text(self.uzs),
            TransactionField::Usd => decimal_text(self.usd),
            TransactionField::Rate => decimal_text(self.rate),
            TransactionField::TotalUzs => self.total_uzs.to_string(),
            TransactionField::Category => self.category.clone(),
            TransactionField::Comment => self.comment.clone(),
        }
    }

    /// Returns `true` when both values refer to the same in-memory record.
    pub fn same_record(&self, other: &Transaction) -> bool {
        self.id() == other.id()
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.uzs == other.uzs
            && self.usd == other.usd
            && self.rate == other.rate
            && self.total_uzs == other.total_uzs
            && self.category == other.category
            && self.comment == other.comment
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.date, self.category, self.total_uzs)
    }
}

/// Computes the local-currency total: `usd * rate + uzs`, truncated toward zero.
///
/// Saturates at the `i64` bounds; use [`checked_total`] to reject such inputs.
pub fn compute_total(usd: f64, rate: f64, uzs: f64) -> i64 {
    (usd * rate + uzs).trunc() as i64
}

/// Like [`compute_total`], but `None` when the result is not finite or does not
/// fit in an `i64`.
pub fn checked_total(usd: f64, rate: f64, uzs: f64) -> Option<i64> {
    // 2^63, exactly representable; `i64::MAX as f64` rounds up to it.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    let total = (usd * rate + uzs).trunc();
    (total.is_finite() && (-BOUND..BOUND).contains(&total)).then(|| total as i64)
}

/// Renders a decimal amount with at least one fractional digit (`100.0`, `12.5`).
///
/// Values at or above `1e16` or below `1e-4` use exponent notation with a
/// signed, two-digit exponent (`1e+16`, `2.5e-05`).
pub fn decimal_text(value: f64) -> String {
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        Err(_) => text,
    }
}

fn deserialize_total<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTotal {
        Int(i64),
        Float(f64),
    }

    Ok(match RawTotal::deserialize(deserializer)? {
        RawTotal::Int(value) => value,
        RawTotal::Float(value) => value.trunc() as i64,
    })
}

/// Names the seven persisted record fields, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionField {
    Date,
    Uzs,
    Usd,
    Rate,
    TotalUzs,
    Category,
    Comment,
}

impl TransactionField {
    pub const ALL: [TransactionField; 7] = [
        TransactionField::Date,
        TransactionField::Uzs,
        TransactionField::Usd,
        TransactionField::Rate,
        TransactionField::TotalUzs,
        TransactionField::Category,
        TransactionField::Comment,
    ];

    /// Key used in the ledger file and in export headers.
    pub fn key(self) -> &'static str {
        match self {
            TransactionField::Date => "date",
            TransactionField::Uzs => "uzs",
            TransactionField::Usd => "usd",
            TransactionField::Rate => "rate",
            TransactionField::TotalUzs => "total_uzs",
            TransactionField::Category => "category",
            TransactionField::Comment => "comment",
        }
    }

    /// Column heading shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionField::Date => "Date",
            TransactionField::Uzs => "UZS",
            TransactionField::Usd => "USD",
            TransactionField::Rate => "Rate",
            TransactionField::TotalUzs => "Total UZS",
            TransactionField::Category => "Category",
            TransactionField::Comment => "Comment",
        }
    }
}

impl fmt::Display for TransactionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a field name matches neither a key nor a column heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction field `{}`", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for TransactionField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        TransactionField::ALL
            .into_iter()
            .find(|field| {
                field.key().eq_ignore_ascii_case(needle)
                    || field.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}
