//! Storage layer for savings-goals
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod file_io;
pub mod goals;

pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;

use crate::config::paths::GoalPaths;
use crate::error::GoalError;

/// Owns the paths and the repositories backed by them
pub struct Storage {
    paths: GoalPaths,
    pub goals: GoalRepository,
}

impl Storage {
    pub fn new(paths: GoalPaths) -> Result<Self, GoalError> {
        paths.ensure_directories()?;

        Ok(Self {
            goals: GoalRepository::new(paths.goals_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &GoalPaths {
        &self.paths
    }

    pub fn load_all(&mut self) -> Result<(), GoalError> {
        self.goals.load()
    }

    pub fn save_all(&self) -> Result<(), GoalError> {
        self.goals.save()
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
