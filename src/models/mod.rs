//! Core data models for savings-goals
//!
//! Goals, ledger transactions and the date helpers shared between them.

pub mod dates;
pub mod goal;
pub mod transaction;

pub use goal::{Goal, GoalDuration, GoalEdit, GoalValidationError};
pub use transaction::Transaction;
