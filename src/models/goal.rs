//! Savings goal model
//!
//! A goal is a straight-line savings trajectory from `start_balance` at
//! `start_date` to `end_balance` after `duration_in_seconds`. The on-disk
//! shape uses camelCase keys. `durationInSeconds` holds whole seconds; files
//! that stored milliseconds under that key read as 1000 times too long.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::{format_duration, SECONDS_PER_DAY};

/// How long a goal runs, given either as a length or as an end instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalDuration {
    Seconds(i64),
    Until(DateTime<Utc>),
}

impl GoalDuration {
    /// Length in seconds for a goal starting at `start`
    pub fn seconds_from(&self, start: DateTime<Utc>) -> i64 {
        match self {
            Self::Seconds(seconds) => *seconds,
            Self::Until(end) => (*end - start).num_seconds(),
        }
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub tag: String,
    pub start_date: DateTime<Utc>,
    pub duration_in_seconds: i64,
    #[serde(default)]
    pub start_balance: f64,
    pub end_balance: f64,
}

impl Goal {
    pub fn new(
        tag: impl Into<String>,
        start_date: DateTime<Utc>,
        duration: GoalDuration,
        start_balance: f64,
        end_balance: f64,
    ) -> Self {
        Self {
            tag: tag.into(),
            start_date,
            duration_in_seconds: duration.seconds_from(start_date),
            start_balance,
            end_balance,
        }
    }

    /// `None` when the length does not fit in a `Duration`
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_seconds(self.duration_in_seconds)
    }

    /// The instant the goal should reach `end_balance`, or `None` when it
    /// lies outside the representable date range
    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.start_date.checked_add_signed(self.duration()?)
    }

    pub fn duration_millis(&self) -> f64 {
        self.duration_in_seconds as f64 * 1000.0
    }

    pub fn duration_days(&self) -> f64 {
        self.duration_in_seconds as f64 / SECONDS_PER_DAY as f64
    }

    /// Average balance change per day needed to hit the target on schedule.
    ///
    /// Negative for goals that plan to draw a balance down; zero when the
    /// start and end balances match.
    pub fn daily_rate(&self) -> f64 {
        (self.end_balance - self.start_balance) / self.duration_days()
    }

    /// Whether a transaction on `date` can count toward this goal.
    /// The start instant itself is excluded.
    pub fn is_active_at(&self, date: DateTime<Utc>) -> bool {
        self.start_date < date
    }

    pub fn set_duration(&mut self, duration: GoalDuration) {
        self.duration_in_seconds = duration.seconds_from(self.start_date);
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.tag.trim().is_empty() {
            return Err(GoalValidationError::EmptyTag);
        }

        if self.duration_in_seconds <= 0 {
            return Err(GoalValidationError::NonPositiveDuration);
        }

        if self.end_date().is_none() {
            return Err(GoalValidationError::DurationOutOfRange);
        }

        if !self.start_balance.is_finite() || !self.end_balance.is_finite() {
            return Err(GoalValidationError::NonFiniteBalance);
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} -> {:.2} over {}",
            self.tag,
            self.start_balance,
            self.end_balance,
            format_duration(self.duration_in_seconds)
        )
    }
}

/// A partial update to an existing goal. The tag is never editable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalEdit {
    pub start_date: Option<DateTime<Utc>>,
    pub duration: Option<GoalDuration>,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
}

impl GoalEdit {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.duration.is_none()
            && self.start_balance.is_none()
            && self.end_balance.is_none()
    }

    /// Apply the edit to a copy of `goal`.
    ///
    /// A new start date keeps the old length unless a duration is given too;
    /// an end-date duration is measured from the (possibly new) start date.
    pub fn apply(&self, goal: &Goal) -> Goal {
        let mut edited = goal.clone();

        if let Some(start_date) = self.start_date {
            edited.start_date = start_date;
        }
        if let Some(duration) = self.duration {
            edited.set_duration(duration);
        }
        if let Some(start_balance) = self.start_balance {
            edited.start_balance = start_balance;
        }
        if let Some(end_balance) = self.end_balance {
            edited.end_balance = end_balance;
        }

        edited
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTag,
    NonPositiveDuration,
    DurationOutOfRange,
    NonFiniteBalance,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTag => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveDuration => write!(f, "Goal duration must be positive"),
            Self::DurationOutOfRange => write!(f, "Goal would end beyond the supported date range"),
            Self::NonFiniteBalance => write!(f, "Goal balances must be finite numbers"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
