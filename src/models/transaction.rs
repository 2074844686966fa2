//! Ledger transaction model
//!
//! Transactions are read-only observations imported from ledger files. The
//! allocation engine only looks at `date` and `amount`; the remaining fields
//! are carried for listing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::midnight_utc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default)]
    pub payee: String,
    #[serde(default)]
    pub memo: String,
    /// Ledger file the transaction was read from
    #[serde(default)]
    pub source: String,
}

impl Transaction {
    pub fn new(date: DateTime<Utc>, amount: f64) -> Self {
        Self {
            date,
            amount,
            payee: String::new(),
            memo: String::new(),
            source: String::new(),
        }
    }

    /// A transaction dated at midnight UTC of `date`
    pub fn on_day(date: NaiveDate, amount: f64) -> Self {
        Self::new(midnight_utc(date), amount)
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = payee.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.date.format("%Y-%m-%d"), self.amount)?;
        if !self.payee.is_empty() {
            write!(f, " {}", self.payee)?;
        }
        Ok(())
    }
}
