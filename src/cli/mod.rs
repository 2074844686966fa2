//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod goal;
pub mod progress;

pub use goal::{handle_goal_command, GoalCommands};
pub use progress::{handle_show_command, handle_transactions_command};
