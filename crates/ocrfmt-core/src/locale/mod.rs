//! Locale database: the set of locales whose formats make up the catalog.

mod builtin;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;
use crate::format::{DateFormat, DateStyle, FormatCategory, FormatRule, FormatVariant, NumberFormat, NumberStyle};

pub use builtin::builtin_locales;

/// A language with an optional region, e.g. `de-AT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(|r| r.to_ascii_uppercase()),
        }
    }

    /// ISO 639 language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// ISO 3166 region code, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();

        let valid_language =
            (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic());
        let valid_region = region.is_none_or(|r| {
            (r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()))
                || (r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()))
        });

        if !valid_language || !valid_region || parts.next().is_some() {
            return Err(FormatError::UnknownLocale(s.to_string()));
        }

        Ok(Self::new(language, region))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Month, weekday and day-period names of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNames {
    /// Month names as used inside a formatted date, January first.
    pub months: [String; 12],
    /// Abbreviated month names.
    pub months_short: [String; 12],
    /// Weekday names, Sunday first.
    pub weekdays: [String; 7],
    /// Abbreviated weekday names, Sunday first.
    pub weekdays_short: [String; 7],
    /// Ante meridiem marker.
    pub am: String,
    /// Post meridiem marker.
    pub pm: String,
}

impl CalendarNames {
    pub fn new(
        months: [&str; 12],
        months_short: [&str; 12],
        weekdays: [&str; 7],
        weekdays_short: [&str; 7],
        am: &str,
        pm: &str,
    ) -> Self {
        Self {
            months: months.map(str::to_string),
            months_short: months_short.map(str::to_string),
            weekdays: weekdays.map(str::to_string),
            weekdays_short: weekdays_short.map(str::to_string),
            am: am.to_string(),
            pm: pm.to_string(),
        }
    }
}

/// Raw, uncompiled description of a locale's formats.
///
/// Number patterns use `#` for the digits, `¤` for the currency symbol and
/// `-` for the minus sign. A pattern may carry an explicit negative form
/// after `;`, otherwise the negative form is `-` followed by the positive one.
#[derive(Debug, Clone)]
pub struct LocaleSpec {
    pub locale: Locale,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub minus_sign: char,
    pub grouping_size: usize,
    pub percent_pattern: String,
    pub currency_pattern: String,
    pub currency_symbol: String,
    pub currency_digits: u32,
    /// Date patterns for Full, Long, Medium and Short.
    pub date_patterns: [String; 4],
    /// Time patterns for Full, Long, Medium and Short.
    pub time_patterns: [String; 4],
    /// Text placed between the date and the time part.
    pub date_time_separator: String,
    pub names: Arc<CalendarNames>,
}

/// A locale with all of its formats compiled.
#[derive(Debug, Clone)]
pub struct LocaleData {
    locale: Locale,
    number: NumberFormat,
    percent: NumberFormat,
    currency: NumberFormat,
    dates: [DateFormat; 4],
    times: [DateFormat; 4],
    date_time_separator: String,
}

impl LocaleData {
    /// Compile a locale description, rejecting malformed patterns.
    pub fn compile(spec: &LocaleSpec) -> Result<Self, FormatError> {
        let number = NumberFormat::new(spec, NumberStyle::Number)?;
        let percent = NumberFormat::new(spec, NumberStyle::Percent)?;
        let currency = NumberFormat::new(spec, NumberStyle::Currency)?;

        let compile_all = |patterns: &[String; 4]| -> Result<[DateFormat; 4], FormatError> {
            let [full, long, medium, short] = patterns;
            Ok([
                DateFormat::compile(full, spec.names.clone())?,
                DateFormat::compile(long, spec.names.clone())?,
                DateFormat::compile(medium, spec.names.clone())?,
                DateFormat::compile(short, spec.names.clone())?,
            ])
        };

        Ok(Self {
            locale: spec.locale.clone(),
            number,
            percent,
            currency,
            dates: compile_all(&spec.date_patterns)?,
            times: compile_all(&spec.time_patterns)?,
            date_time_separator: spec.date_time_separator.clone(),
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The formatting rule this locale uses for a category variant.
    ///
    /// Returns `None` when the variant does not belong to the category.
    pub fn rule(&self, category: FormatCategory, variant: FormatVariant) -> Option<FormatRule> {
        match (category, variant) {
            (FormatCategory::Number, FormatVariant::Numeric) => {
                Some(FormatRule::Number(self.number.clone()))
            }
            (FormatCategory::Percent, FormatVariant::Numeric) => {
                Some(FormatRule::Number(self.percent.clone()))
            }
            (FormatCategory::Currency, FormatVariant::Numeric) => {
                Some(FormatRule::Number(self.currency.clone()))
            }
            (FormatCategory::Date, FormatVariant::Date(style)) => {
                Some(FormatRule::Temporal(self.date(style).clone()))
            }
            (FormatCategory::Time, FormatVariant::Time(style)) => {
                Some(FormatRule::Temporal(self.time(style).clone()))
            }
            (FormatCategory::DateTime, FormatVariant::DateTime(date_style, time_style)) => {
                Some(FormatRule::Temporal(DateFormat::combine(
                    self.date(date_style),
                    &self.date_time_separator,
                    self.time(time_style),
                )))
            }
            _ => None,
        }
    }

    fn date(&self, style: DateStyle) -> &DateFormat {
        &self.dates[style.index()]
    }

    fn time(&self, style: DateStyle) -> &DateFormat {
        &self.times[style.index()]
    }
}

/// Ordered collection of compiled locales.
///
/// Iteration order decides which locale becomes the representative of a
/// canonical format, so it is kept stable.
#[derive(Debug, Clone, Default)]
pub struct LocaleDatabase {
    locales: Vec<LocaleData>,
}

impl LocaleDatabase {
    pub fn new(locales: Vec<LocaleData>) -> Self {
        Self { locales }
    }

    /// Compile a database from locale descriptions.
    pub fn from_specs(specs: &[LocaleSpec]) -> Result<Self, FormatError> {
        let locales = specs
            .iter()
            .map(LocaleData::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(locales))
    }

    /// The locale table shipped with the library.
    pub fn builtin() -> &'static LocaleDatabase {
        &builtin::BUILTIN
    }

    pub fn get(&self, locale: &Locale) -> Result<&LocaleData, FormatError> {
        self.locales
            .iter()
            .find(|data| data.locale() == locale)
            .ok_or_else(|| FormatError::UnknownLocale(locale.to_string()))
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.iter().any(|data| data.locale() == locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleData> {
        self.locales.iter()
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter().map(LocaleData::locale)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_locale() {
        let locale: Locale = "de_at".parse().unwrap();
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.region(), Some("AT"));
        assert_eq!(locale.to_string(), "de-AT");

        let language_only: Locale = "pl".parse().unwrap();
        assert_eq!(language_only.region(), None);
        assert_eq!(language_only.to_string(), "pl");

        let numeric_region: Locale = "es-419".parse().unwrap();
        assert_eq!(numeric_region.to_string(), "es-419");
    }

    #[test]
    fn test_parse_invalid_locale() {
        assert!("".parse::<Locale>().is_err());
        assert!("german".parse::<Locale>().is_err());
        assert!("de-DE-1996".parse::<Locale>().is_err());
        assert!("d3-DE".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serde_as_tag() {
        let locale: Locale = "fr-CA".parse().unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"fr-CA\"");

        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
    }

    #[test]
    fn test_builtin_database() {
        let db = LocaleDatabase::builtin();
        assert!(!db.is_empty());

        let unique: HashSet<_> = db.locales().collect();
        assert_eq!(unique.len(), db.len(), "locale tags must be unique");

        let us: Locale = "en-US".parse().unwrap();
        assert!(db.contains(&us));
        assert!(db.get(&us).is_ok());
    }

    #[test]
    fn test_unknown_locale_lookup() {
        let db = LocaleDatabase::builtin();
        let klingon = Locale::new("tlh", None);
        assert_eq!(
            db.get(&klingon).unwrap_err(),
            FormatError::UnknownLocale("tlh".to_string())
        );
    }

    #[test]
    fn test_rule_rejects_foreign_variant() {
        let db = LocaleDatabase::builtin();
        let data = db.iter().next().unwrap();

        assert!(data.rule(FormatCategory::Number, FormatVariant::Numeric).is_some());
        assert!(data
            .rule(FormatCategory::Number, FormatVariant::Date(DateStyle::Short))
            .is_none());
        assert!(data
            .rule(FormatCategory::Date, FormatVariant::Time(DateStyle::Short))
            .is_none());
    }
}
