//! Progress service
//!
//! Loads the goal snapshot and the ledger once, runs the allocation engine
//! and projects every goal at the requested instant.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::engine::{allocate, project_all, ProjectedProgress};
use crate::error::GoalResult;
use crate::ledger::LedgerSource;
use crate::models::{Goal, Transaction};
use crate::storage::Storage;

/// A goal alongside its projected progress
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: ProjectedProgress,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub as_of: DateTime<Utc>,
    pub transaction_count: usize,
    pub rows: Vec<GoalProgress>,
}

impl ProgressReport {
    pub fn total_achieved(&self) -> f64 {
        self.rows.iter().map(|r| r.progress.achieved).sum()
    }

    pub fn total_expected(&self) -> f64 {
        self.rows.iter().map(|r| r.progress.expected_by_now).sum()
    }

    pub fn total_surplus(&self) -> f64 {
        self.rows.iter().map(|r| r.progress.surplus).sum()
    }
}

pub struct ProgressService<'a> {
    storage: &'a Storage,
    ledger: LedgerSource,
}

impl<'a> ProgressService<'a> {
    pub fn new(storage: &'a Storage, ledger: LedgerSource) -> Self {
        Self { storage, ledger }
    }

    pub fn report(&self, now: DateTime<Utc>) -> GoalResult<ProgressReport> {
        let goals = self.storage.goals.snapshot()?;
        let transactions = self.ledger.load()?;
        build_report(goals, &transactions, now)
    }
}

/// Allocate `transactions` across `goals` and project each goal at `now`
pub fn build_report(
    goals: Vec<Goal>,
    transactions: &[Transaction],
    now: DateTime<Utc>,
) -> GoalResult<ProgressReport> {
    let allocations = allocate(&goals, transactions)?;
    let projections = project_all(&goals, &allocations, now)?;

    debug!(goals = goals.len(), as_of = %now, "projected goal progress");

    Ok(ProgressReport {
        as_of: now,
        transaction_count: transactions.len(),
        rows: goals
            .into_iter()
            .zip(projections)
            .map(|(goal, progress)| GoalProgress { goal, progress })
            .collect(),
    })
}
