//! Goal repository for JSON storage
//!
//! goals.json holds a bare array of goals keyed by tag. Tags must be unique
//! within the file; a repeated tag fails the load.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::GoalError;
use crate::models::Goal;

use super::file_io::{read_json, write_json_atomic};

pub struct GoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<String, Goal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), GoalError> {
        let file_data: Vec<Goal> = read_json(&self.path)?;

        let mut goals = self
            .goals
            .write()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.clear();
        for goal in file_data {
            if goals.contains_key(&goal.tag) {
                return Err(GoalError::Storage(format!(
                    "{} lists goal '{}' more than once",
                    self.path.display(),
                    goal.tag
                )));
            }
            goals.insert(goal.tag.clone(), goal);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), GoalError> {
        write_json_atomic(&self.path, &self.snapshot()?)
    }

    /// An owned copy of every goal, ordered by start date then tag
    pub fn snapshot(&self) -> Result<Vec<Goal>, GoalError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<Goal> = goals.values().cloned().collect();
        list.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.tag.cmp(&b.tag))
        });
        Ok(list)
    }

    pub fn get(&self, tag: &str) -> Result<Option<Goal>, GoalError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.get(tag).cloned())
    }

    /// Look a goal up by exact tag, falling back to a unique tag prefix
    pub fn find(&self, query: &str) -> Result<Option<Goal>, GoalError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Some(goal) = goals.get(query) {
            return Ok(Some(goal.clone()));
        }

        let mut matches = goals.values().filter(|g| g.tag.starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(goal), None) => Ok(Some(goal.clone())),
            _ => Ok(None),
        }
    }

    /// Add a new goal. Fails if the tag is already taken.
    pub fn insert(&self, goal: Goal) -> Result<(), GoalError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if goals.contains_key(&goal.tag) {
            return Err(GoalError::duplicate_goal(goal.tag));
        }

        goals.insert(goal.tag.clone(), goal);
        Ok(())
    }

    /// Replace an existing goal with the same tag
    pub fn replace(&self, goal: Goal) -> Result<(), GoalError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match goals.get_mut(&goal.tag) {
            Some(existing) => {
                *existing = goal;
                Ok(())
            }
            None => Err(GoalError::goal_not_found(goal.tag)),
        }
    }

    pub fn delete(&self, tag: &str) -> Result<bool, GoalError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(goals.remove(tag).is_some())
    }

    pub fn count(&self) -> Result<usize, GoalError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| GoalError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.len())
    }
}
