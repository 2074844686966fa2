//! Progress and transaction listing commands

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::paths::GoalPaths;
use crate::config::settings::Settings;
use crate::display::{format_progress_table, format_transaction_list};
use crate::error::GoalResult;
use crate::ledger::LedgerSource;
use crate::services::ProgressService;
use crate::storage::Storage;

use super::goal::parse_date_arg;

/// Show every goal's expected and achieved savings
pub fn handle_show_command(
    storage: &Storage,
    settings: &Settings,
    as_of: Option<&str>,
    ledger_dir: Option<PathBuf>,
) -> GoalResult<()> {
    let now = resolve_now(as_of)?;
    let ledger = ledger_source(storage.paths(), settings, ledger_dir);

    let report = ProgressService::new(storage, ledger).report(now)?;
    print!("{}", format_progress_table(&report, settings));
    Ok(())
}

/// List ledger transactions, newest first
pub fn handle_transactions_command(
    paths: &GoalPaths,
    settings: &Settings,
    limit: usize,
    ledger_dir: Option<PathBuf>,
) -> GoalResult<()> {
    let ledger = ledger_source(paths, settings, ledger_dir);
    let transactions = ledger.load()?;

    if transactions.is_empty() {
        println!("No transactions found in {}.", ledger.dir().display());
        println!();
        println!("Drop .qif or .csv exports from your bank into that directory.");
        return Ok(());
    }

    print!("{}", format_transaction_list(&transactions, limit, settings));
    Ok(())
}

fn resolve_now(as_of: Option<&str>) -> GoalResult<DateTime<Utc>> {
    match as_of {
        Some(text) => parse_date_arg(text, Utc::now().date_naive()),
        None => Ok(Utc::now()),
    }
}

fn ledger_source(
    paths: &GoalPaths,
    settings: &Settings,
    ledger_dir: Option<PathBuf>,
) -> LedgerSource {
    LedgerSource::new(ledger_dir.unwrap_or_else(|| settings.resolve_ledger_dir(paths)))
}
