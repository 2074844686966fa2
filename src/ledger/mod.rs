//! Ledger transaction source
//!
//! Reads every `.qif` and `.csv` file in a directory and returns the
//! transactions they contain. Other files are ignored. Any malformed record
//! fails the whole load so progress is never computed from a partial ledger.

pub mod delimited;
pub mod qif;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GoalError, GoalResult};
use crate::models::Transaction;

pub use delimited::parse_csv;
pub use qif::parse_qif;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFormat {
    Qif,
    Csv,
}

impl LedgerFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "qif" => Some(Self::Qif),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Parse a ledger amount, tolerating thousands separators and a leading
/// currency symbol
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '£' | '$' | '€'))
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub struct LedgerSource {
    dir: PathBuf,
}

impl LedgerSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ledger files in the directory, sorted by name
    pub fn files(&self) -> GoalResult<Vec<PathBuf>> {
        if !self.dir.exists() {
            warn!(dir = %self.dir.display(), "ledger directory does not exist");
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            GoalError::Import(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| GoalError::Import(format!("Failed to read directory entry: {}", e)))?
                .path();
            if path.is_file() && LedgerFormat::from_path(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load every transaction from every ledger file
    pub fn load(&self) -> GoalResult<Vec<Transaction>> {
        let mut transactions = Vec::new();
        for path in self.files()? {
            let loaded = load_file(&path)?;
            debug!(file = %path.display(), count = loaded.len(), "read ledger file");
            transactions.extend(loaded);
        }

        info!(
            dir = %self.dir.display(),
            count = transactions.len(),
            "loaded ledger transactions"
        );
        Ok(transactions)
    }
}

/// Parse a single ledger file, choosing the reader by extension
pub fn load_file(path: &Path) -> GoalResult<Vec<Transaction>> {
    let format = LedgerFormat::from_path(path).ok_or_else(|| {
        GoalError::Import(format!("Unsupported ledger file: {}", path.display()))
    })?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| GoalError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match format {
        LedgerFormat::Qif => parse_qif(&content, &source),
        LedgerFormat::Csv => parse_csv(&content, &source),
    }
}
