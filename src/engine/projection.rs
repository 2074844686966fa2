//! Progress projection
//!
//! Compares the savings a goal has achieved with where a straight-line
//! schedule says it should be by now.
//!
//! The schedule scales the full `end_balance` by the fraction of the goal's
//! duration that has elapsed. It is not offset by `start_balance`, so a goal
//! seeded with a non-zero start balance looks ahead of schedule early on.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GoalError, GoalResult};
use crate::models::Goal;

use super::allocation::AllocationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedProgress {
    pub tag: String,
    pub expected_by_now: f64,
    pub achieved: f64,
    /// Positive when ahead of schedule, negative when behind
    pub surplus: f64,
}

impl ProjectedProgress {
    pub fn is_ahead(&self) -> bool {
        self.surplus > 0.0
    }

    pub fn is_behind(&self) -> bool {
        self.surplus < 0.0
    }
}

/// Fraction of the goal's duration elapsed at `now`.
///
/// Not clamped: negative before the start, above one after the end.
pub fn elapsed_fraction(goal: &Goal, now: DateTime<Utc>) -> f64 {
    let elapsed_millis = (now - goal.start_date).num_milliseconds() as f64;
    elapsed_millis / goal.duration_millis()
}

pub fn project(goal: &Goal, now: DateTime<Utc>, achieved: f64) -> ProjectedProgress {
    let expected_by_now = goal.end_balance * elapsed_fraction(goal, now);

    ProjectedProgress {
        tag: goal.tag.clone(),
        expected_by_now,
        achieved,
        surplus: achieved - expected_by_now,
    }
}

/// Project every goal using its allocated savings as the achieved amount.
///
/// Fails with [`GoalError::UnknownGoalReference`] if a goal has no matching
/// allocation result.
pub fn project_all(
    goals: &[Goal],
    allocations: &[AllocationResult],
    now: DateTime<Utc>,
) -> GoalResult<Vec<ProjectedProgress>> {
    let savings: HashMap<&str, f64> = allocations
        .iter()
        .map(|a| (a.tag.as_str(), a.savings))
        .collect();

    goals
        .iter()
        .map(|goal| {
            let achieved = savings
                .get(goal.tag.as_str())
                .copied()
                .ok_or_else(|| GoalError::UnknownGoalReference(goal.tag.clone()))?;
            Ok(project(goal, now, achieved))
        })
        .collect()
}
