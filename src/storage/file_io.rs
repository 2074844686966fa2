//! JSON file helpers
//!
//! Writes go to a sibling temp file which is synced and renamed over the
//! target, so goals.json is never left half written.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::GoalError;

/// Read JSON from `path`, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, GoalError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "no file yet, using default");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| GoalError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| GoalError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Serialize `data` as pretty JSON and atomically replace `path`.
///
/// The parent directory must already exist; `Storage::new` creates it.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), GoalError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(data)?;

    // Sibling of the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");
    write_synced(&temp_path, &bytes).map_err(|e| {
        GoalError::Storage(format!("Failed to write {}: {}", temp_path.display(), e))
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GoalError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, GoalDuration};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_goals() -> Vec<Goal> {
        vec![Goal::new(
            "boiler",
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            GoalDuration::Seconds(86_400 * 100),
            0.0,
            2500.0,
        )]
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let goals: Vec<Goal> = read_json(temp_dir.path().join("goals.json")).unwrap();
        assert!(goals.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");

        write_json_atomic(&path, &sample_goals()).unwrap();

        let loaded: Vec<Goal> = read_json(&path).unwrap();
        assert_eq!(loaded, sample_goals());
        assert!(!temp_dir.path().join("goals.json.tmp").exists());
    }

    #[test]
    fn test_missing_parent_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent").join("goals.json");

        let err = write_json_atomic(&path, &sample_goals()).unwrap_err();
        assert!(matches!(err, GoalError::Storage(_)));
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Vec<Goal>, _>(&path).unwrap_err();
        assert!(matches!(err, GoalError::Storage(_)));
    }
}
