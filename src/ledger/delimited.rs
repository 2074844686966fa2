//! CSV ledger reader
//!
//! Expects a header row followed by `date,amount[,payee[,memo]]` records.
//! Column order is fixed; header names are not inspected.

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{GoalError, GoalResult};
use crate::models::dates::parse_ledger_date;
use crate::models::Transaction;

use super::parse_amount;

const DATE_COLUMN: usize = 0;
const AMOUNT_COLUMN: usize = 1;
const PAYEE_COLUMN: usize = 2;
const MEMO_COLUMN: usize = 3;

/// Parse CSV text into transactions tagged with `source`
pub fn parse_csv(content: &str, source: &str) -> GoalResult<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut transactions = Vec::new();
    for (index, result) in reader.records().enumerate() {
        // Row numbers as seen in a spreadsheet: header is row 1
        let row = index + 2;
        let record = result
            .map_err(|e| GoalError::Import(format!("{} row {}: {}", source, row, e)))?;

        if record.iter().all(str::is_empty) {
            continue;
        }

        transactions.push(parse_record(&record, row, source)?);
    }

    Ok(transactions)
}

fn parse_record(record: &StringRecord, row: usize, source: &str) -> GoalResult<Transaction> {
    let field = move |column: usize| record.get(column).unwrap_or("");
    let row_error =
        |reason: String| GoalError::Import(format!("{} row {}: {}", source, row, reason));

    let raw_date = field(DATE_COLUMN);
    let date = parse_ledger_date(raw_date)
        .ok_or_else(|| row_error(format!("invalid date '{}'", raw_date)))?;

    let raw_amount = field(AMOUNT_COLUMN);
    let amount = parse_amount(raw_amount)
        .ok_or_else(|| row_error(format!("invalid amount '{}'", raw_amount)))?;

    Ok(Transaction::on_day(date, amount)
        .with_payee(field(PAYEE_COLUMN))
        .with_memo(field(MEMO_COLUMN))
        .with_source(source))
}
