//! Configuration structures for the resolution pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FormatError;
use crate::format::{DateStyle, Probe};
use crate::locale::Locale;

/// Main configuration for ocrfmt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrFmtConfig {
    /// Format catalog and selection configuration.
    pub formats: FormatConfig,
}

/// Format catalog and default selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Start every category on the automatic choice.
    pub automatic_format_initially_selected: bool,

    /// Locale used to pick the initial format when automatic is off.
    pub locale: String,

    /// Number rendered by every locale to compare number formats.
    pub probe_number: f64,

    /// Timestamp rendered by every locale to compare date/time formats.
    pub probe_date: NaiveDateTime,

    /// Date/time styles included in the catalog.
    pub date_styles: Vec<DateStyle>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            automatic_format_initially_selected: true,
            locale: "en-US".to_string(),
            probe_number: Probe::DEFAULT_NUMBER,
            probe_date: Probe::default_date(),
            date_styles: DateStyle::ALL.to_vec(),
        }
    }
}

impl FormatConfig {
    pub fn probe(&self) -> Probe {
        Probe {
            number: self.probe_number,
            date: self.probe_date,
        }
    }

    /// The configured locale, parsed.
    pub fn locale(&self) -> Result<Locale, FormatError> {
        self.locale.parse()
    }
}

impl OcrFmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OcrFmtConfig::default();
        assert!(config.formats.automatic_format_initially_selected);
        assert_eq!(config.formats.locale, "en-US");
        assert_eq!(config.formats.date_styles.len(), 4);
        assert_eq!(config.formats.probe(), Probe::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "formats": { "locale": "de-DE" } }"#;
        let config: OcrFmtConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.formats.locale, "de-DE");
        assert!(config.formats.automatic_format_initially_selected);
        assert_eq!(config.formats.probe_number, Probe::DEFAULT_NUMBER);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = OcrFmtConfig::default();
        config.formats.automatic_format_initially_selected = false;
        config.formats.locale = "pl-PL".to_string();
        config.formats.date_styles = vec![DateStyle::Short];
        config.save(&path).unwrap();

        let loaded = OcrFmtConfig::from_file(&path).unwrap();
        assert!(!loaded.formats.automatic_format_initially_selected);
        assert_eq!(loaded.formats.locale().unwrap().to_string(), "pl-PL");
        assert_eq!(loaded.formats.date_styles, vec![DateStyle::Short]);
        assert_eq!(loaded.formats.probe_date, Probe::default_date());
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = OcrFmtConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
