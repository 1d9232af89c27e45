//! CLI command implementations.

pub mod config;
pub mod formats;
pub mod locales;
pub mod resolve;

use std::path::{Path, PathBuf};

use tracing::debug;

use ocrfmt_core::models::config::OcrFmtConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ocrfmt")
        .join("config.json")
}

/// Configuration file in effect: the `--config` path or the default one.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// An explicitly given file must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<OcrFmtConfig> {
    let path = config_path(explicit);

    if path.exists() {
        debug!("Loading config from {}", path.display());
        return read_config(&path);
    }

    if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Ok(OcrFmtConfig::default())
}

fn read_config(path: &Path) -> anyhow::Result<OcrFmtConfig> {
    OcrFmtConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))
}
