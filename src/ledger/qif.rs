//! Quicken Interchange Format reader
//!
//! Only the fields needed for goal tracking are read. Each record is a run of
//! lines starting with a one-letter field code and ends with `^`:
//!
//! ```text
//! !Type:Bank
//! D1/6/2024
//! T150.00
//! PEmployer
//! ^
//! ```

use crate::error::{GoalError, GoalResult};
use crate::models::dates::parse_ledger_date;
use crate::models::Transaction;

use super::parse_amount;

#[derive(Default)]
struct PendingRecord {
    date: Option<String>,
    amount: Option<String>,
    payee: String,
    memo: String,
    first_line: usize,
}

impl PendingRecord {
    fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.payee.is_empty()
            && self.memo.is_empty()
    }

    fn finish(self, source: &str) -> GoalResult<Transaction> {
        let line = self.first_line;
        let raw_date = self
            .date
            .ok_or_else(|| record_error(source, line, "missing date (D) field"))?;
        let date = parse_ledger_date(&raw_date)
            .ok_or_else(|| record_error(source, line, &format!("invalid date '{}'", raw_date)))?;

        let raw_amount = self
            .amount
            .ok_or_else(|| record_error(source, line, "missing amount (T) field"))?;
        let amount = parse_amount(&raw_amount).ok_or_else(|| {
            record_error(source, line, &format!("invalid amount '{}'", raw_amount))
        })?;

        Ok(Transaction::on_day(date, amount)
            .with_payee(self.payee)
            .with_memo(self.memo)
            .with_source(source))
    }
}

fn record_error(source: &str, line: usize, reason: &str) -> GoalError {
    GoalError::Import(format!("{} line {}: {}", source, line, reason))
}

/// Parse QIF text into transactions tagged with `source`
pub fn parse_qif(content: &str, source: &str) -> GoalResult<Vec<Transaction>> {
    let mut transactions = Vec::new();
    let mut record = PendingRecord::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        // Header lines like !Type:Bank or !Option:AutoSwitch
        if line.starts_with('!') {
            continue;
        }

        if line.starts_with('^') {
            let finished = std::mem::take(&mut record);
            if !finished.is_empty() {
                transactions.push(finished.finish(source)?);
            }
            continue;
        }

        if record.is_empty() {
            record.first_line = line_number;
        }

        let mut chars = line.chars();
        let code = chars.next().unwrap_or_default();
        let value = chars.as_str().trim();

        match code {
            'D' => record.date = Some(value.to_string()),
            // Newer exporters repeat T as U; T wins when both are present
            'T' | 'U' => {
                if record.amount.is_none() || code == 'T' {
                    record.amount = Some(value.to_string());
                }
            }
            'P' => record.payee = value.to_string(),
            'M' => record.memo = value.to_string(),
            // Cleared status, check numbers, categories, splits and addresses
            _ => {}
        }
    }

    // Tolerate a missing terminator on the last record
    if !record.is_empty() {
        transactions.push(record.finish(source)?);
    }

    Ok(transactions)
}
