//! Path management for savings-goals
//!
//! ## Path Resolution Order
//!
//! 1. `SAVINGS_GOALS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/savings-goals` on Linux,
//!    `~/Library/Application Support/savings-goals` on macOS,
//!    `%APPDATA%\savings-goals` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::GoalError;

pub const DATA_DIR_ENV: &str = "SAVINGS_GOALS_DATA_DIR";

/// Manages all paths used by savings-goals
#[derive(Debug, Clone)]
pub struct GoalPaths {
    base_dir: PathBuf,
}

impl GoalPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, GoalError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create GoalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding goals.json
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory scanned for `.qif` and `.csv` ledger files
    pub fn ledger_dir(&self) -> PathBuf {
        self.base_dir.join("ledgers")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    /// Create the base, data and ledger directories
    pub fn ensure_directories(&self) -> Result<(), GoalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GoalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GoalError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.ledger_dir())
            .map_err(|e| GoalError::Io(format!("Failed to create ledger directory: {}", e)))?;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, GoalError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| GoalError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("savings-goals"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GoalPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.ledger_dir(), temp_dir.path().join("ledgers"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GoalPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.ledger_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GoalPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.goals_file(),
            temp_dir.path().join("data").join("goals.json")
        );
    }
}
