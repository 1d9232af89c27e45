//! Resolved values and destination field types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::format::{CategorySet, FormatCategory};

/// The typed outcome of interpreting OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolvedValue {
    Number(f64),
    /// Fraction, so `25%` is `0.25`.
    Percent(f64),
    Currency(f64),
    Date(NaiveDateTime),
    /// Time of day on 1970-01-01.
    Time(NaiveDateTime),
    DateTime(NaiveDateTime),
    /// No category applied; the input exactly as it was given.
    RawText(String),
}

impl ResolvedValue {
    /// The category that produced this value, `None` for raw text.
    pub fn category(&self) -> Option<FormatCategory> {
        match self {
            Self::Number(_) => Some(FormatCategory::Number),
            Self::Percent(_) => Some(FormatCategory::Percent),
            Self::Currency(_) => Some(FormatCategory::Currency),
            Self::Date(_) => Some(FormatCategory::Date),
            Self::Time(_) => Some(FormatCategory::Time),
            Self::DateTime(_) => Some(FormatCategory::DateTime),
            Self::RawText(_) => None,
        }
    }

    pub fn is_raw_text(&self) -> bool {
        matches!(self, Self::RawText(_))
    }

    /// Numeric payload of a number, percent or currency value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) | Self::Percent(n) | Self::Currency(n) => Some(*n),
            _ => None,
        }
    }

    /// Timestamp payload of a date, time or date-time value.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(t) | Self::Time(t) | Self::DateTime(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Percent(n) => write!(f, "percent {n}"),
            Self::Currency(n) => write!(f, "currency {n}"),
            Self::Date(t) => write!(f, "date {}", t.date()),
            Self::Time(t) => write!(f, "time {}", t.time()),
            Self::DateTime(t) => write!(f, "date-time {t}"),
            Self::RawText(text) => write!(f, "text {text:?}"),
        }
    }
}

/// Declared type of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text; no category is attempted.
    Text,
    Number,
    Percent,
    Currency,
    /// Monetary amount written either plainly or with a currency symbol.
    Amount,
    Date,
    Time,
    DateTime,
    /// Any point in time: date, time or both.
    Timestamp,
}

impl FieldType {
    /// Categories worth attempting for this field.
    pub fn categories(self) -> CategorySet {
        use FormatCategory::*;

        let categories: &[FormatCategory] = match self {
            Self::Text => &[],
            Self::Number => &[Number],
            Self::Percent => &[Percent],
            Self::Currency => &[Currency],
            Self::Amount => &[Number, Currency],
            Self::Date => &[Date],
            Self::Time => &[Time],
            Self::DateTime => &[DateTime],
            Self::Timestamp => &[Date, Time, DateTime],
        };
        categories.iter().copied().collect()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Percent => "percent",
            Self::Currency => "currency",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "percent" => Ok(Self::Percent),
            "currency" => Ok(Self::Currency),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "date_time" | "datetime" => Ok(Self::DateTime),
            "timestamp" => Ok(Self::Timestamp),
            other => Err(format!("unknown field type: {other}")),
        }
    }
}
