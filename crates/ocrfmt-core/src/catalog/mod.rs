//! Catalog of distinct formats across all locales.
//!
//! Two locales share a format when they render the probe value to the same
//! string. How the rule is configured internally does not matter.

mod selector;

pub use selector::{FormatChoice, FormatSelection, FormatSelector};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::FormatError;
use crate::format::{DateStyle, FormatCategory, FormatRule, FormatVariant, Probe};
use crate::locale::{Locale, LocaleDatabase};
use crate::models::config::FormatConfig;

/// A format identified by its rendering of the probe value.
#[derive(Debug, Clone)]
pub struct CanonicalFormat {
    category: FormatCategory,
    variant: FormatVariant,
    rendered: String,
    representative: Locale,
    locales: BTreeSet<Locale>,
    rule: FormatRule,
}

impl CanonicalFormat {
    pub fn category(&self) -> FormatCategory {
        self.category
    }

    /// Variant of the representative rule.
    pub fn variant(&self) -> FormatVariant {
        self.variant
    }

    /// The probe value rendered with this format.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// First locale that produced this rendering.
    pub fn representative(&self) -> &Locale {
        &self.representative
    }

    /// Every locale that renders the probe identically.
    pub fn locales(&self) -> &BTreeSet<Locale> {
        &self.locales
    }

    pub fn rule(&self) -> &FormatRule {
        &self.rule
    }
}

impl fmt::Display for CanonicalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Distinct formats per category, built once and then read-only.
#[derive(Debug, Clone)]
pub struct FormatCatalog {
    formats: BTreeMap<FormatCategory, Vec<Arc<CanonicalFormat>>>,
    locales: Vec<Locale>,
    probe: Probe,
}

/// Insertion-ordered formats of one category, indexed by rendering.
#[derive(Default)]
struct CategoryBuilder {
    formats: Vec<CanonicalFormat>,
    index: HashMap<String, usize>,
}

impl CategoryBuilder {
    fn add(&mut self, category: FormatCategory, variant: FormatVariant, locale: &Locale, rule: FormatRule, probe: &Probe) {
        let rendered = rule.render_probe(probe);

        if let Some(&i) = self.index.get(&rendered) {
            self.formats[i].locales.insert(locale.clone());
            return;
        }

        debug!("New {} format {:?} from {} ({})", category, rendered, locale, variant);
        self.index.insert(rendered.clone(), self.formats.len());
        self.formats.push(CanonicalFormat {
            category,
            variant,
            rendered,
            representative: locale.clone(),
            locales: BTreeSet::from([locale.clone()]),
            rule,
        });
    }
}

impl FormatCatalog {
    /// Render the probe with every locale's rule and keep one format per
    /// distinct rendering.
    ///
    /// Locales are visited in database order, styles in the order given.
    pub fn build(database: &LocaleDatabase, probe: Probe, styles: &[DateStyle]) -> Self {
        let mut builders: BTreeMap<FormatCategory, CategoryBuilder> = FormatCategory::ALL
            .iter()
            .map(|&category| (category, CategoryBuilder::default()))
            .collect();

        for data in database.iter() {
            for (&category, builder) in builders.iter_mut() {
                for variant in category.variants(styles) {
                    if let Some(rule) = data.rule(category, variant) {
                        builder.add(category, variant, data.locale(), rule, &probe);
                    }
                }
            }
        }

        let formats: BTreeMap<_, _> = builders
            .into_iter()
            .map(|(category, builder)| {
                let formats: Vec<_> = builder.formats.into_iter().map(Arc::new).collect();
                info!("Catalog has {} distinct {} formats", formats.len(), category);
                (category, formats)
            })
            .collect();

        Self {
            formats,
            locales: database.locales().cloned().collect(),
            probe,
        }
    }

    /// Build from the built-in locale table using configured probe and styles.
    pub fn from_config(config: &FormatConfig) -> Self {
        Self::build(LocaleDatabase::builtin(), config.probe(), &config.date_styles)
    }

    /// Formats of a category in catalog order.
    pub fn formats(&self, category: FormatCategory) -> &[Arc<CanonicalFormat>] {
        self.formats.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, category: FormatCategory, index: usize) -> Result<&Arc<CanonicalFormat>, FormatError> {
        self.formats(category)
            .get(index)
            .ok_or_else(|| FormatError::UnknownFormat {
                category,
                format: format!("#{index}"),
            })
    }

    /// Format with the given probe rendering.
    pub fn find(&self, category: FormatCategory, rendered: &str) -> Option<&Arc<CanonicalFormat>> {
        self.formats(category).iter().find(|f| f.rendered == rendered)
    }

    /// Locales the catalog was built from, in database order.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn contains_locale(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// Total number of formats across all categories.
    pub fn len(&self) -> usize {
        self.formats.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{builtin_locales, LocaleData};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn catalog() -> FormatCatalog {
        FormatCatalog::build(LocaleDatabase::builtin(), Probe::default(), &DateStyle::ALL)
    }

    #[test]
    fn test_every_category_has_formats() {
        let catalog = catalog();
        for category in FormatCategory::ALL {
            assert!(!catalog.formats(category).is_empty(), "{category} is empty");
        }
    }

    #[test]
    fn test_renderings_are_distinct() {
        let catalog = catalog();
        for category in FormatCategory::ALL {
            let rendered: HashSet<_> = catalog.formats(category).iter().map(|f| f.rendered()).collect();
            assert_eq!(rendered.len(), catalog.formats(category).len(), "duplicates in {category}");
        }
    }

    #[test]
    fn test_locales_partitioned() {
        let database = LocaleDatabase::builtin();
        let catalog = catalog();
        let probe = Probe::default();

        for category in FormatCategory::ALL {
            for variant in category.variants(&DateStyle::ALL) {
                for data in database.iter() {
                    let rendered = data.rule(category, variant).unwrap().render_probe(&probe);
                    let owners: Vec<_> = catalog
                        .formats(category)
                        .iter()
                        .filter(|f| f.rendered() == rendered)
                        .collect();
                    assert_eq!(owners.len(), 1, "{} {category} {variant}", data.locale());
                    assert!(owners[0].locales().contains(data.locale()));
                }
            }
        }
    }

    #[test]
    fn test_numeric_locale_sets_cover_each_locale_once() {
        let catalog = catalog();
        for category in [FormatCategory::Number, FormatCategory::Percent, FormatCategory::Currency] {
            let mut seen = Vec::new();
            for format in catalog.formats(category) {
                seen.extend(format.locales().iter().cloned());
            }
            seen.sort();
            let mut expected = catalog.locales().to_vec();
            expected.sort();
            assert_eq!(seen, expected, "{category}");
        }
    }

    #[test]
    fn test_locale_sets_render_identically() {
        let database = LocaleDatabase::builtin();
        let catalog = catalog();
        let probe = Probe::default();

        for category in FormatCategory::ALL {
            for format in catalog.formats(category) {
                assert_eq!(format.rule().render_probe(&probe), format.rendered());
                for locale in format.locales() {
                    let data = database.get(locale).unwrap();
                    let matches = category
                        .variants(&DateStyle::ALL)
                        .into_iter()
                        .filter_map(|v| data.rule(category, v))
                        .any(|rule| rule.render_probe(&probe) == format.rendered());
                    assert!(matches, "{locale} does not render {:?}", format.rendered());
                }
            }
        }
    }

    #[test]
    fn test_first_locale_is_representative() {
        let catalog = catalog();
        let number = &catalog.formats(FormatCategory::Number)[0];
        assert_eq!(number.representative().to_string(), "en-US");
        assert_eq!(number.rendered(), "-12,345.987");
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = catalog();
        let second = catalog();
        for category in FormatCategory::ALL {
            let a: Vec<_> = first.formats(category).iter().map(|f| f.rendered().to_string()).collect();
            let b: Vec<_> = second.formats(category).iter().map(|f| f.rendered().to_string()).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_identical_locales_share_a_format() {
        let mut specs = builtin_locales();
        let mut twin = specs[0].clone();
        twin.locale = "en-ZZ".parse().unwrap();
        specs.truncate(1);
        specs.push(twin);

        let database = LocaleDatabase::from_specs(&specs).unwrap();
        let catalog = FormatCatalog::build(&database, Probe::default(), &DateStyle::ALL);

        for category in FormatCategory::ALL {
            for format in catalog.formats(category) {
                assert_eq!(format.locales().len(), 2);
                assert_eq!(format.representative().to_string(), "en-US");
            }
        }
    }

    #[test]
    fn test_limited_styles() {
        let catalog = FormatCatalog::build(LocaleDatabase::builtin(), Probe::default(), &[DateStyle::Short]);
        for format in catalog.formats(FormatCategory::DateTime) {
            assert_eq!(format.variant(), FormatVariant::DateTime(DateStyle::Short, DateStyle::Short));
        }
    }

    #[test]
    fn test_empty_database() {
        let catalog = FormatCatalog::build(&LocaleDatabase::new(Vec::<LocaleData>::new()), Probe::default(), &DateStyle::ALL);
        assert!(catalog.is_empty());
        assert!(catalog.get(FormatCategory::Number, 0).is_err());
    }

    #[test]
    fn test_find_and_get() {
        let catalog = catalog();
        let first = catalog.get(FormatCategory::Currency, 0).unwrap();
        let found = catalog.find(FormatCategory::Currency, first.rendered()).unwrap();
        assert!(Arc::ptr_eq(first, found));
        assert!(catalog.find(FormatCategory::Currency, "nope").is_none());
    }
}
