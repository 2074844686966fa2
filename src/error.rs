//! Custom error types for savings-goals
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for savings-goals operations
#[derive(Error, Debug)]
pub enum GoalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A goal violates its own invariants (e.g. non-positive duration)
    #[error("Malformed goal '{tag}': {reason}")]
    MalformedGoal { tag: String, reason: String },

    /// A transaction carries a value the engine cannot use
    #[error("Malformed transaction dated {date}: {reason}")]
    MalformedTransaction { date: String, reason: String },

    /// Progress was requested for a goal missing from the allocation results
    #[error("No allocation result for goal '{0}'")]
    UnknownGoalReference(String),

    /// Ledger import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GoalError {
    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for goals
    pub fn duplicate_goal(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    pub fn malformed_goal(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGoal {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for GoalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GoalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for savings-goals operations
pub type GoalResult<T> = Result<T, GoalError>;
