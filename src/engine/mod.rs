//! Allocation and progress-projection engine
//!
//! Pure functions over an immutable snapshot of goals and a fully loaded set
//! of transactions. Nothing here touches storage or keeps state between calls.

pub mod allocation;
pub mod projection;
pub mod summation;

pub use allocation::{allocate, split, AllocationResult, Share};
pub use projection::{elapsed_fraction, project, project_all, ProjectedProgress};
pub use summation::CompensatedSum;
