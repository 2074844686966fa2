//! Configuration module for savings-goals
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::GoalPaths;
pub use settings::Settings;
