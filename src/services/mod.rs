//! Service layer for savings-goals
//!
//! Business logic on top of the storage layer and the engine: validation,
//! persistence of edits, and assembling progress reports.

pub mod goal;
pub mod progress;

pub use goal::GoalService;
pub use progress::{build_report, GoalProgress, ProgressReport, ProgressService};
