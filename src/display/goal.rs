//! Goal display formatting
//!
//! Progress table, plain goal list and single-goal detail view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::engine::elapsed_fraction;
use crate::models::dates::format_duration;
use crate::models::Goal;
use crate::services::ProgressReport;

use super::{format_date, format_money};

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Goal")]
    tag: String,
    #[tabled(rename = "Start date")]
    start_date: String,
    #[tabled(rename = "Start balance")]
    start_balance: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Savings target")]
    target: String,
    #[tabled(rename = "Expected by today")]
    expected: String,
    #[tabled(rename = "Achieved")]
    achieved: String,
    #[tabled(rename = "Surplus")]
    surplus: String,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    tag: String,
    #[tabled(rename = "Start date")]
    start_date: String,
    #[tabled(rename = "End date")]
    end_date: String,
    #[tabled(rename = "Start balance")]
    start_balance: String,
    #[tabled(rename = "Savings target")]
    target: String,
    #[tabled(rename = "Per day")]
    daily_rate: String,
}

/// The goal progress table
pub fn format_progress_table(report: &ProgressReport, settings: &Settings) -> String {
    if report.rows.is_empty() {
        return "No goals found.".to_string();
    }

    let money = |amount: f64| format_money(amount, &settings.currency_symbol);

    let rows: Vec<ProgressRow> = report
        .rows
        .iter()
        .map(|row| ProgressRow {
            tag: row.goal.tag.clone(),
            start_date: format_date(row.goal.start_date, &settings.date_format),
            start_balance: money(row.goal.start_balance),
            duration: format_duration(row.goal.duration_in_seconds),
            target: money(row.goal.end_balance),
            expected: money(row.progress.expected_by_now),
            achieved: money(row.progress.achieved),
            surplus: money(row.progress.surplus),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(2..3), Alignment::right())
        .modify(Columns::new(4..), Alignment::right());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!(
        "As of {} from {} transaction(s). Total surplus: {}\n",
        format_date(report.as_of, &settings.date_format),
        report.transaction_count,
        money(report.total_surplus()),
    ));

    let ahead = report.rows.iter().filter(|r| r.progress.is_ahead()).count();
    let behind = report.rows.iter().filter(|r| r.progress.is_behind()).count();
    output.push_str(&format!("{} ahead of schedule, {} behind.\n", ahead, behind));
    output
}

/// A list of goals without progress figures
pub fn format_goal_list(goals: &[Goal], settings: &Settings) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let money = |amount: f64| format_money(amount, &settings.currency_symbol);

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|goal| GoalRow {
            tag: goal.tag.clone(),
            start_date: format_date(goal.start_date, &settings.date_format),
            end_date: format_end_date(goal, settings),
            start_balance: money(goal.start_balance),
            target: money(goal.end_balance),
            daily_rate: money(goal.daily_rate()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(3..), Alignment::right());

    format!("{}\n{} goal(s)\n", table, goals.len())
}

fn format_end_date(goal: &Goal, settings: &Settings) -> String {
    match goal.end_date() {
        Some(end) => format_date(end, &settings.date_format),
        None => "out of range".to_string(),
    }
}

/// A single goal's details, including how far through its schedule it is
/// at `now`
pub fn format_goal_details(
    goal: &Goal,
    now: chrono::DateTime<chrono::Utc>,
    settings: &Settings,
) -> String {
    let money = |amount: f64| format_money(amount, &settings.currency_symbol);
    let elapsed = elapsed_fraction(goal, now) * 100.0;

    let mut output = String::new();
    output.push_str(&format!("Goal: {}\n", goal.tag));
    output.push_str(&format!(
        "  Start date:     {}\n",
        format_date(goal.start_date, &settings.date_format)
    ));
    output.push_str(&format!(
        "  End date:       {}\n",
        format_end_date(goal, settings)
    ));
    output.push_str(&format!(
        "  Duration:       {} ({} seconds)\n",
        format_duration(goal.duration_in_seconds),
        goal.duration_in_seconds
    ));
    output.push_str(&format!("  Start balance:  {}\n", money(goal.start_balance)));
    output.push_str(&format!("  Savings target: {}\n", money(goal.end_balance)));
    output.push_str(&format!("  Per day:        {}\n", money(goal.daily_rate())));
    output.push_str(&format!("  Elapsed:        {:.1}%\n", elapsed));

    output
}
