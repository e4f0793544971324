//! User settings for SplitSmart
//!
//! Holds the acting user, the fixed conversion rate used to normalize foreign
//! expenses, and whether the remote mirror is fed.

use serde::{Deserialize, Serialize};

use super::paths::SplitPaths;
use crate::error::SplitError;
use crate::models::{UserId, DEFAULT_CONVERSION_RATE};

/// User settings for SplitSmart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The logged-in user that balances are reported for
    #[serde(default)]
    pub current_user: Option<UserId>,

    /// Fixed rate applied to every expense not recorded in the common unit.
    /// This is deliberately not a live exchange rate.
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,

    /// Whether create events are written to the mirror outbox
    #[serde(default = "default_mirror_enabled")]
    pub mirror_enabled: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_conversion_rate() -> f64 {
    DEFAULT_CONVERSION_RATE
}

fn default_mirror_enabled() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_user: None,
            conversion_rate: default_conversion_rate(),
            mirror_enabled: default_mirror_enabled(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SplitPaths) -> Result<Self, SplitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SplitError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitPaths) -> Result<(), SplitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SplitError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SplitError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
