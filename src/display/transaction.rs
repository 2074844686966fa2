//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Transaction;

use super::{format_date, format_money};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Memo")]
    memo: String,
    #[tabled(rename = "File")]
    source: String,
}

/// Newest transactions first, at most `limit` rows
pub fn format_transaction_list(
    transactions: &[Transaction],
    limit: usize,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let rows: Vec<TransactionRow> = sorted
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            date: format_date(t.date, "%Y-%m-%d"),
            amount: format_money(t.amount, &settings.currency_symbol),
            payee: t.payee.clone(),
            memo: t.memo.clone(),
            source: t.source.clone(),
        })
        .collect();

    let shown = rows.len();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..2), Alignment::right());

    let money = |amount: f64| format_money(amount, &settings.currency_symbol);
    let money_in: f64 = transactions
        .iter()
        .filter(|t| t.is_inflow())
        .map(|t| t.amount)
        .sum();
    let money_out: f64 = transactions
        .iter()
        .filter(|t| t.is_outflow())
        .map(|t| t.amount)
        .sum();

    format!(
        "{}\nShowing {} of {} transaction(s). In: {} Out: {} Net total: {}\n",
        table,
        shown,
        transactions.len(),
        money(money_in),
        money(money_out),
        money(money_in + money_out)
    )
}
