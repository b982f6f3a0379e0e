//! Configuration for the omnos utilities.
//!
//! Loaded from an `omnos.toml` document. Every field has a default, so an
//! empty document (or no document at all) yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtilsConfig {
    /// Logging settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Terminal color settings.
    #[serde(default)]
    pub color: ColorConfig,
}

impl UtilsConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `UtilError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::UtilError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log filter directive: trace, debug, info, warn, error, or a full
    /// `target=level` list.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Terminal color settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// When false, a [`Palette`](crate::color::Palette) returns text unstyled.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
