//! Display formatting for terminal output
//!
//! Turns goals, progress reports and transactions into tables and detail
//! views. Nothing here feeds back into the engine.

pub mod goal;
pub mod transaction;

use std::fmt::Write;

use chrono::{DateTime, Utc};

pub use goal::{format_goal_details, format_goal_list, format_progress_table};
pub use transaction::format_transaction_list;

/// Format an amount with a currency symbol and thousands separators,
/// e.g. `-£1,234.50`
pub fn format_money(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, grouped, fraction)
}

/// Format a date with a user-supplied strftime pattern, falling back to ISO
/// when the pattern is invalid
pub fn format_date(date: DateTime<Utc>, pattern: &str) -> String {
    let mut output = String::new();
    match write!(output, "{}", date.format(pattern)) {
        Ok(()) => output,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}
