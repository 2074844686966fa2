//! User settings for savings-goals
//!
//! Display preferences and an optional override for where ledger files live.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::GoalPaths;
use crate::error::GoalError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for tables (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Directory scanned for ledger files instead of `<base>/ledgers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_date_format() -> String {
    "%A %-d %B %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            ledger_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &GoalPaths) -> Result<Self, GoalError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| GoalError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| GoalError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &GoalPaths) -> Result<(), GoalError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GoalError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The ledger directory in effect: the configured override or the default
    pub fn resolve_ledger_dir(&self, paths: &GoalPaths) -> PathBuf {
        self.ledger_dir
            .clone()
            .unwrap_or_else(|| paths.ledger_dir())
    }
}
