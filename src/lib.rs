//! savings-goals - allocate bank transactions to time-boxed savings goals
//!
//! Each goal asks for a target amount saved over a period. Every transaction
//! in the user's exported ledgers is split across the goals running on its
//! date, weighted by each goal's required daily savings rate, and the totals
//! are compared with where a linear schedule says each goal should be.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Goals, transactions and date/duration parsing
//! - `engine`: Allocation and progress projection (pure functions)
//! - `ledger`: QIF and CSV ledger readers
//! - `storage`: JSON file storage for goals
//! - `services`: Business logic layer
//! - `display`: Table formatting
//! - `cli`: Command handlers for the `goals` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use savings_goals::engine::{allocate, project_all};
//!
//! let allocations = allocate(&goals, &transactions)?;
//! let progress = project_all(&goals, &allocations, chrono::Utc::now())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{GoalError, GoalResult};
