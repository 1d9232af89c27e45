//! Per-category format selection.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{CanonicalFormat, FormatCatalog};
use crate::error::FormatError;
use crate::format::FormatCategory;
use crate::models::config::FormatConfig;

/// What to use when parsing text of one category.
#[derive(Debug, Clone, Default)]
pub enum FormatChoice {
    /// Try every format of the category.
    #[default]
    Automatic,
    Specific(Arc<CanonicalFormat>),
}

static AUTOMATIC: FormatChoice = FormatChoice::Automatic;

impl FormatChoice {
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::Automatic)
    }

    /// The pinned format, if any.
    pub fn format(&self) -> Option<&Arc<CanonicalFormat>> {
        match self {
            Self::Automatic => None,
            Self::Specific(format) => Some(format),
        }
    }
}

impl PartialEq for FormatChoice {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Automatic, Self::Automatic) => true,
            (Self::Specific(a), Self::Specific(b)) => {
                a.category() == b.category() && a.rendered() == b.rendered()
            }
            _ => false,
        }
    }
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => f.write_str("Automatic"),
            Self::Specific(format) => write!(f, "{format}"),
        }
    }
}

/// Snapshot of the active choice of every category.
///
/// Categories without an entry are automatic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatSelection {
    choices: BTreeMap<FormatCategory, FormatChoice>,
}

impl FormatSelection {
    /// Every category automatic.
    pub fn automatic() -> Self {
        Self::default()
    }

    pub fn get(&self, category: FormatCategory) -> &FormatChoice {
        self.choices.get(&category).unwrap_or(&AUTOMATIC)
    }

    /// Pin a format to its own category.
    pub fn pin(&mut self, format: Arc<CanonicalFormat>) {
        self.choices.insert(format.category(), FormatChoice::Specific(format));
    }

    fn set(&mut self, category: FormatCategory, choice: FormatChoice) {
        match choice {
            FormatChoice::Automatic => {
                self.choices.remove(&category);
            }
            specific => {
                self.choices.insert(category, specific);
            }
        }
    }
}

/// Holds the catalog and the active choice per category.
#[derive(Debug, Clone)]
pub struct FormatSelector {
    catalog: Arc<FormatCatalog>,
    active: FormatSelection,
}

impl FormatSelector {
    /// Start on automatic, or on the configured locale's formats when
    /// automatic selection is disabled.
    pub fn new(catalog: Arc<FormatCatalog>, config: &FormatConfig) -> Self {
        let mut active = FormatSelection::automatic();

        if !config.automatic_format_initially_selected {
            match config.locale() {
                Ok(locale) if catalog.contains_locale(&locale) => {
                    for category in FormatCategory::ALL {
                        let first = catalog
                            .formats(category)
                            .iter()
                            .find(|f| f.locales().contains(&locale));
                        if let Some(format) = first {
                            debug!("Initial {} format for {}: {:?}", category, locale, format.rendered());
                            active.pin(format.clone());
                        }
                    }
                }
                Ok(locale) => {
                    warn!("Locale {} is not in the catalog, using automatic formats", locale);
                }
                Err(e) => {
                    warn!("Invalid locale in config ({}), using automatic formats", e);
                }
            }
        }

        Self { catalog, active }
    }

    pub fn catalog(&self) -> &Arc<FormatCatalog> {
        &self.catalog
    }

    /// All choices per category, automatic first.
    pub fn choices(&self) -> BTreeMap<FormatCategory, Vec<FormatChoice>> {
        FormatCategory::ALL
            .iter()
            .map(|&category| (category, self.choices_for(category)))
            .collect()
    }

    pub fn choices_for(&self, category: FormatCategory) -> Vec<FormatChoice> {
        std::iter::once(FormatChoice::Automatic)
            .chain(
                self.catalog
                    .formats(category)
                    .iter()
                    .cloned()
                    .map(FormatChoice::Specific),
            )
            .collect()
    }

    pub fn get_active(&self, category: FormatCategory) -> &FormatChoice {
        self.active.get(category)
    }

    /// Make `choice` the active choice of `category`.
    ///
    /// A specific format must belong to the category and to this catalog.
    pub fn set_active(&mut self, category: FormatCategory, choice: FormatChoice) -> Result<(), FormatError> {
        if let FormatChoice::Specific(format) = &choice {
            if format.category() != category {
                return Err(FormatError::CategoryMismatch {
                    format: format.rendered().to_string(),
                    expected: category,
                    actual: format.category(),
                });
            }
            if self.catalog.find(category, format.rendered()).is_none() {
                return Err(FormatError::UnknownFormat {
                    category,
                    format: format.rendered().to_string(),
                });
            }
        }

        debug!("Selected {} format: {}", category, choice);
        self.active.set(category, choice);
        Ok(())
    }

    /// Select by position in [`choices_for`](Self::choices_for); 0 is automatic.
    pub fn select_index(&mut self, category: FormatCategory, index: usize) -> Result<(), FormatError> {
        let choice = match index {
            0 => FormatChoice::Automatic,
            i => FormatChoice::Specific(self.catalog.get(category, i - 1)?.clone()),
        };
        self.set_active(category, choice)
    }

    /// Copy of the current selection for the resolver.
    pub fn snapshot(&self) -> FormatSelection {
        self.active.clone()
    }
}
