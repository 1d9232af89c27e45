//! Number, percent, currency, date and time formatting rules.

mod date;
mod number;

pub use date::DateFormat;
pub use number::{NumberFormat, NumberStyle};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::value::ResolvedValue;

/// Kinds of values a format can render and parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatCategory {
    Number,
    Percent,
    Currency,
    Date,
    Time,
    DateTime,
}

impl FormatCategory {
    /// All categories in display order.
    pub const ALL: [FormatCategory; 6] = [
        FormatCategory::Number,
        FormatCategory::Percent,
        FormatCategory::Currency,
        FormatCategory::Date,
        FormatCategory::Time,
        FormatCategory::DateTime,
    ];

    /// Rule variants that exist for this category given the enabled styles.
    ///
    /// Date-time variants are the cross product of date and time styles.
    pub fn variants(self, styles: &[DateStyle]) -> Vec<FormatVariant> {
        match self {
            Self::Number | Self::Percent | Self::Currency => vec![FormatVariant::Numeric],
            Self::Date => styles.iter().map(|&s| FormatVariant::Date(s)).collect(),
            Self::Time => styles.iter().map(|&s| FormatVariant::Time(s)).collect(),
            Self::DateTime => styles
                .iter()
                .flat_map(|&d| styles.iter().map(move |&t| FormatVariant::DateTime(d, t)))
                .collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Percent => "percent",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "number" => Ok(Self::Number),
            "percent" | "percentage" => Ok(Self::Percent),
            "currency" => Ok(Self::Currency),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "date_time" | "datetime" => Ok(Self::DateTime),
            other => Err(format!("unknown format category: {other}")),
        }
    }
}

/// Set of categories a destination field accepts.
pub type CategorySet = BTreeSet<FormatCategory>;

/// Standard date/time format lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl DateStyle {
    pub const ALL: [DateStyle; 4] = [Self::Full, Self::Long, Self::Medium, Self::Short];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Full => 0,
            Self::Long => 1,
            Self::Medium => 2,
            Self::Short => 3,
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Long => "long",
            Self::Medium => "medium",
            Self::Short => "short",
        };
        f.write_str(name)
    }
}

/// Which of a locale's rules within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatVariant {
    /// The single number, percent or currency rule.
    Numeric,
    Date(DateStyle),
    Time(DateStyle),
    /// Date style, then time style.
    DateTime(DateStyle, DateStyle),
}

impl fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("default"),
            Self::Date(style) | Self::Time(style) => write!(f, "{style}"),
            Self::DateTime(date, time) => write!(f, "{date}/{time}"),
        }
    }
}

/// Fixed values rendered with every rule to compare formats by their output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub number: f64,
    pub date: NaiveDateTime,
}

impl Probe {
    pub const DEFAULT_NUMBER: f64 = -12345.987;

    /// 2017-11-28 21:07:09: day above 12 and an evening hour.
    pub fn default_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 11, 28)
            .and_then(|d| d.and_hms_opt(21, 7, 9))
            .unwrap_or_default()
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            number: Self::DEFAULT_NUMBER,
            date: Self::default_date(),
        }
    }
}

/// A concrete, locale-bound rule for one category variant.
#[derive(Debug, Clone)]
pub enum FormatRule {
    Number(NumberFormat),
    Temporal(DateFormat),
}

impl FormatRule {
    /// Render the probe value this rule applies to.
    pub fn render_probe(&self, probe: &Probe) -> String {
        match self {
            Self::Number(format) => format.format(probe.number),
            Self::Temporal(format) => format.format(&probe.date),
        }
    }

    /// Parse text into a value of `category`.
    pub fn parse(&self, category: FormatCategory, text: &str) -> Result<ResolvedValue, String> {
        match (self, category) {
            (Self::Number(format), FormatCategory::Number) => format.parse(text).map(ResolvedValue::Number),
            (Self::Number(format), FormatCategory::Percent) => format.parse(text).map(ResolvedValue::Percent),
            (Self::Number(format), FormatCategory::Currency) => format.parse(text).map(ResolvedValue::Currency),
            (Self::Temporal(format), FormatCategory::Date) => format.parse(text).map(ResolvedValue::Date),
            (Self::Temporal(format), FormatCategory::Time) => format.parse(text).map(ResolvedValue::Time),
            (Self::Temporal(format), FormatCategory::DateTime) => format.parse(text).map(ResolvedValue::DateTime),
            (_, category) => Err(format!("rule cannot produce {category} values")),
        }
    }

    /// Render a resolved value back to text, if this rule can represent it.
    pub fn render_value(&self, value: &ResolvedValue) -> Option<String> {
        match (self, value) {
            (
                Self::Number(format),
                ResolvedValue::Number(n) | ResolvedValue::Percent(n) | ResolvedValue::Currency(n),
            ) => Some(format.format(*n)),
            (
                Self::Temporal(format),
                ResolvedValue::Date(t) | ResolvedValue::Time(t) | ResolvedValue::DateTime(t),
            ) => Some(format.format(t)),
            _ => None,
        }
    }

    /// Human-readable pattern of the rule.
    pub fn pattern(&self) -> String {
        match self {
            Self::Number(format) => format.pattern(),
            Self::Temporal(format) => format.pattern().to_string(),
        }
    }
}

/// Characters OCR output may produce in place of any kind of space.
pub(crate) fn is_space_like(c: char) -> bool {
    matches!(c, ' ' | '\u{00a0}' | '\u{202f}' | '\u{2009}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_cross_product() {
        let styles = DateStyle::ALL;
        assert_eq!(FormatCategory::Number.variants(&styles), vec![FormatVariant::Numeric]);
        assert_eq!(FormatCategory::Date.variants(&styles).len(), 4);
        assert_eq!(FormatCategory::Time.variants(&styles).len(), 4);

        let date_time = FormatCategory::DateTime.variants(&styles);
        assert_eq!(date_time.len(), 16);
        assert_eq!(date_time[0], FormatVariant::DateTime(DateStyle::Full, DateStyle::Full));
        assert_eq!(date_time[15], FormatVariant::DateTime(DateStyle::Short, DateStyle::Short));
    }

    #[test]
    fn test_variants_respect_enabled_styles() {
        let styles = [DateStyle::Short];
        assert_eq!(
            FormatCategory::DateTime.variants(&styles),
            vec![FormatVariant::DateTime(DateStyle::Short, DateStyle::Short)]
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Number".parse::<FormatCategory>(), Ok(FormatCategory::Number));
        assert_eq!("date-time".parse::<FormatCategory>(), Ok(FormatCategory::DateTime));
        assert_eq!("percentage".parse::<FormatCategory>(), Ok(FormatCategory::Percent));
        assert!("money".parse::<FormatCategory>().is_err());
    }

    #[test]
    fn test_default_probe() {
        let probe = Probe::default();
        assert_eq!(probe.number, -12345.987);
        assert_eq!(probe.date.to_string(), "2017-11-28 21:07:09");
    }
}
