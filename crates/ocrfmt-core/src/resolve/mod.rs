//! Turning OCR text into a typed value.

mod source;

pub use source::{OcrTextBuffer, OcrTextSource};

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CanonicalFormat, FormatCatalog, FormatChoice, FormatSelection};
use crate::error::ParseFailure;
use crate::format::{CategorySet, FormatCategory};
use crate::models::value::ResolvedValue;

/// Order in which categories are attempted when a field accepts several.
///
/// Combined date-time text would also partially fit a date or time pattern
/// in some locales, so the most specific category goes first.
pub const RESOLUTION_ORDER: [FormatCategory; 6] = [
    FormatCategory::DateTime,
    FormatCategory::Time,
    FormatCategory::Date,
    FormatCategory::Currency,
    FormatCategory::Percent,
    FormatCategory::Number,
];

/// Outcome of a resolution with the details of how it was reached.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub value: ResolvedValue,
    /// Format that produced the value; `None` for raw text.
    pub format: Option<Arc<CanonicalFormat>>,
    /// Every failed attempt, in the order they were made.
    pub failures: Vec<ParseFailure>,
}

/// Parses text with the catalog's formats.
#[derive(Debug, Clone)]
pub struct ValueResolver {
    catalog: Arc<FormatCatalog>,
}

impl ValueResolver {
    pub fn new(catalog: Arc<FormatCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve `text` for a field accepting `applies_to`.
    ///
    /// Falls back to [`ResolvedValue::RawText`] with the untouched input.
    pub fn resolve(&self, text: &str, selection: &FormatSelection, applies_to: &CategorySet) -> ResolvedValue {
        self.resolve_detailed(text, selection, applies_to).value
    }

    pub fn resolve_detailed(&self, text: &str, selection: &FormatSelection, applies_to: &CategorySet) -> Resolution {
        let mut failures = Vec::new();

        for category in RESOLUTION_ORDER.into_iter().filter(|c| applies_to.contains(c)) {
            let found = match selection.get(category) {
                FormatChoice::Specific(format) => self.try_format(category, format, text, &mut failures),
                FormatChoice::Automatic => self.try_all(category, text, &mut failures),
            };

            if let Some((value, format)) = found {
                debug!("Resolved {:?} as {} using {:?}", text, value, format.rendered());
                return Resolution {
                    value,
                    format: Some(format),
                    failures,
                };
            }
        }

        debug!("No format matched {:?} after {} attempts, keeping raw text", text, failures.len());
        Resolution {
            value: ResolvedValue::RawText(text.to_string()),
            format: None,
            failures,
        }
    }

    fn try_format(
        &self,
        category: FormatCategory,
        format: &Arc<CanonicalFormat>,
        text: &str,
        failures: &mut Vec<ParseFailure>,
    ) -> Option<(ResolvedValue, Arc<CanonicalFormat>)> {
        match format.rule().parse(category, text) {
            Ok(value) => Some((value, format.clone())),
            Err(reason) => {
                failures.push(ParseFailure::new(category, format.rendered(), text, reason));
                None
            }
        }
    }

    /// First format that reproduces `text` exactly, else the first that
    /// parses it at all.
    fn try_all(
        &self,
        category: FormatCategory,
        text: &str,
        failures: &mut Vec<ParseFailure>,
    ) -> Option<(ResolvedValue, Arc<CanonicalFormat>)> {
        let mut first = None;

        for format in self.catalog.formats(category) {
            let Some((value, format)) = self.try_format(category, format, text, failures) else {
                continue;
            };
            if format.rule().render_value(&value).as_deref() == Some(text) {
                return Some((value, format));
            }
            first.get_or_insert((value, format));
        }

        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{DateStyle, Probe};
    use crate::locale::{Locale, LocaleDatabase};
    use crate::models::value::FieldType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn catalog() -> Arc<FormatCatalog> {
        Arc::new(FormatCatalog::build(LocaleDatabase::builtin(), Probe::default(), &DateStyle::ALL))
    }

    fn format_for(catalog: &FormatCatalog, category: FormatCategory, locale: &str) -> Arc<CanonicalFormat> {
        let locale: Locale = locale.parse().unwrap();
        catalog
            .formats(category)
            .iter()
            .find(|f| f.locales().contains(&locale))
            .unwrap()
            .clone()
    }

    #[test]
    fn test_date_time_wins_over_date_and_time() {
        let resolver = ValueResolver::new(catalog());
        let value = resolver.resolve(
            "12/31/2020 10:00",
            &FormatSelection::automatic(),
            &FieldType::Timestamp.categories(),
        );

        let expected = NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(value, ResolvedValue::DateTime(expected));
    }

    #[test]
    fn test_unparseable_text_falls_back_to_raw() {
        let resolver = ValueResolver::new(catalog());
        let resolution = resolver.resolve_detailed(
            "not a number",
            &FormatSelection::automatic(),
            &FieldType::Number.categories(),
        );

        assert_eq!(resolution.value, ResolvedValue::RawText("not a number".to_string()));
        assert!(resolution.format.is_none());
        assert_eq!(
            resolution.failures.len(),
            resolver.catalog.formats(FormatCategory::Number).len()
        );
    }

    #[test]
    fn test_pinned_format_does_not_cascade() {
        let catalog = catalog();
        let resolver = ValueResolver::new(catalog.clone());
        let german = format_for(&catalog, FormatCategory::Number, "de-DE");

        let mut selection = FormatSelection::automatic();
        selection.pin(german);
        let applies = FieldType::Number.categories();

        assert_eq!(resolver.resolve("12,5", &selection, &applies), ResolvedValue::Number(12.5));

        let resolution = resolver.resolve_detailed("12.5", &selection, &applies);
        assert_eq!(resolution.value, ResolvedValue::RawText("12.5".to_string()));
        assert_eq!(resolution.failures.len(), 1);
    }

    #[test]
    fn test_only_field_categories_are_tried() {
        let resolver = ValueResolver::new(catalog());
        let selection = FormatSelection::automatic();

        let value = resolver.resolve("$1,234.50", &selection, &FieldType::Date.categories());
        assert_eq!(value, ResolvedValue::RawText("$1,234.50".to_string()));

        let value = resolver.resolve("$1,234.50", &selection, &FieldType::Amount.categories());
        assert_eq!(value, ResolvedValue::Currency(1234.5));

        let value = resolver.resolve("25%", &selection, &FieldType::Percent.categories());
        assert_eq!(value, ResolvedValue::Percent(0.25));

        let value = resolver.resolve("42", &selection, &FieldType::Text.categories());
        assert_eq!(value, ResolvedValue::RawText("42".to_string()));
    }

    #[test]
    fn test_oversized_digit_run_stays_raw_text() {
        let resolver = ValueResolver::new(catalog());
        let digits = "9".repeat(400);
        let selection = FormatSelection::automatic();

        let value = resolver.resolve(&digits, &selection, &FieldType::Number.categories());
        assert_eq!(value, ResolvedValue::RawText(digits.clone()));

        let value = resolver.resolve(&digits, &selection, &FieldType::Percent.categories());
        assert_eq!(value, ResolvedValue::RawText(digits));
    }

    #[test]
    fn test_input_is_not_trimmed() {
        let resolver = ValueResolver::new(catalog());
        let value = resolver.resolve(" 12.5", &FormatSelection::automatic(), &FieldType::Number.categories());
        assert_eq!(value, ResolvedValue::RawText(" 12.5".to_string()));
    }

    #[test]
    fn test_canonical_text_selects_its_own_format() {
        let catalog = catalog();
        let resolver = ValueResolver::new(catalog.clone());
        let selection = FormatSelection::automatic();

        for category in FormatCategory::ALL {
            let applies = CategorySet::from([category]);
            for format in catalog.formats(category) {
                let resolution = resolver.resolve_detailed(format.rendered(), &selection, &applies);
                let chosen = resolution.format.unwrap();
                assert_eq!(chosen.rendered(), format.rendered(), "{category}");
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = ValueResolver::new(catalog());
        let selection = FormatSelection::automatic();
        let applies = FieldType::Timestamp.categories();

        for text in ["28.11.2017", "9:07 PM", "2017-11-28", "garbage"] {
            let first = resolver.resolve(text, &selection, &applies);
            let second = resolver.resolve(text, &selection, &applies);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_pinned_date_with_automatic_time() {
        let catalog = catalog();
        let resolver = ValueResolver::new(catalog.clone());
        let mut selection = FormatSelection::automatic();
        selection.pin(catalog.get(FormatCategory::Date, 0).unwrap().clone());

        // Pinned date format cannot read this, time is still automatic.
        let value = resolver.resolve("21:07", &selection, &FieldType::Timestamp.categories());
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(21, 7, 0)
            .unwrap();
        assert_eq!(value, ResolvedValue::Time(expected));
    }
}
