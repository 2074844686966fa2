//! Goal service
//!
//! Creates, edits and removes goals. Every change is validated before it
//! reaches the repository and is written to disk immediately.

use tracing::info;

use crate::error::{GoalError, GoalResult};
use crate::models::{Goal, GoalEdit, GoalValidationError};
use crate::storage::Storage;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All goals as an immutable snapshot
    pub fn list_goals(&self) -> GoalResult<Vec<Goal>> {
        self.storage.goals.snapshot()
    }

    /// Find a goal by tag or unique tag prefix
    pub fn find_goal(&self, query: &str) -> GoalResult<Option<Goal>> {
        self.storage.goals.find(query)
    }

    pub fn get_goal(&self, query: &str) -> GoalResult<Goal> {
        self.find_goal(query)?
            .ok_or_else(|| GoalError::goal_not_found(query))
    }

    pub fn create_goal(&self, mut goal: Goal) -> GoalResult<Goal> {
        goal.tag = goal.tag.trim().to_string();
        validate(&goal)?;

        self.storage.goals.insert(goal.clone())?;
        self.storage.goals.save()?;

        info!(tag = %goal.tag, "created goal");
        Ok(goal)
    }

    pub fn edit_goal(&self, query: &str, edit: &GoalEdit) -> GoalResult<Goal> {
        if edit.is_empty() {
            return Err(GoalError::Validation("Nothing to change".into()));
        }

        let current = self.get_goal(query)?;
        let edited = edit.apply(&current);
        validate(&edited)?;

        self.storage.goals.replace(edited.clone())?;
        self.storage.goals.save()?;

        info!(tag = %edited.tag, "edited goal");
        Ok(edited)
    }

    pub fn delete_goal(&self, query: &str) -> GoalResult<Goal> {
        let goal = self.get_goal(query)?;

        self.storage.goals.delete(&goal.tag)?;
        self.storage.goals.save()?;

        info!(tag = %goal.tag, "deleted goal");
        Ok(goal)
    }
}

fn validate(goal: &Goal) -> GoalResult<()> {
    goal.validate().map_err(|e| match e {
        GoalValidationError::EmptyTag => GoalError::Validation(e.to_string()),
        _ => GoalError::malformed_goal(&goal.tag, e.to_string()),
    })
}
