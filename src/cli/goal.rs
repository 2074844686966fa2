//! Goal CLI commands
//!
//! Implements CLI commands for creating, editing and inspecting goals.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_money;
use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::{GoalError, GoalResult};
use crate::models::dates::{
    format_duration, midnight_utc, parse_duration, parse_user_date, SECONDS_PER_YEAR,
};
use crate::models::{Goal, GoalDuration, GoalEdit};
use crate::services::GoalService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new savings goal
    Create {
        /// Unique goal name
        tag: String,
        /// When the goal starts (today, yesterday, YYYY-MM-DD, D/M/YYYY)
        #[arg(short, long, default_value = "today")]
        start: String,
        /// How long the goal lasts (e.g. "1 year", "6 months", "90d")
        #[arg(short, long, conflicts_with = "end")]
        duration: Option<String>,
        /// When the goal ends, instead of --duration
        #[arg(short, long)]
        end: Option<String>,
        /// Amount already saved at the start date
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start_balance: f64,
        /// Amount to have saved by the end date
        #[arg(short, long, allow_hyphen_values = true)]
        target: f64,
    },

    /// Change fields of an existing goal (the name cannot change)
    Edit {
        /// Goal name or unique prefix
        tag: String,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long, conflicts_with = "end")]
        duration: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        start_balance: Option<f64>,
        #[arg(short, long, allow_hyphen_values = true)]
        target: Option<f64>,
    },

    /// List all goals
    List,

    /// Show one goal's details
    Show {
        /// Goal name or unique prefix
        tag: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or unique prefix
        tag: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> GoalResult<()> {
    let service = GoalService::new(storage);
    let today = Utc::now().date_naive();

    match cmd {
        GoalCommands::Create {
            tag,
            start,
            duration,
            end,
            start_balance,
            target,
        } => {
            let start_date = parse_date_arg(&start, today)?;
            let duration = parse_duration_args(duration.as_deref(), end.as_deref(), today)?
                .unwrap_or(GoalDuration::Seconds(SECONDS_PER_YEAR));

            let goal = service.create_goal(Goal::new(
                tag,
                start_date,
                duration,
                start_balance,
                target,
            ))?;

            println!(
                "Created goal '{}': save {} over {}",
                goal.tag,
                format_money(goal.end_balance, &settings.currency_symbol),
                format_duration(goal.duration_in_seconds)
            );
        }

        GoalCommands::Edit {
            tag,
            start,
            duration,
            end,
            start_balance,
            target,
        } => {
            let edit = GoalEdit {
                start_date: start
                    .as_deref()
                    .map(|s| parse_date_arg(s, today))
                    .transpose()?,
                duration: parse_duration_args(duration.as_deref(), end.as_deref(), today)?,
                start_balance,
                end_balance: target,
            };

            let goal = service.edit_goal(&tag, &edit)?;
            println!("Updated goal '{}'.", goal.tag);
            print!("{}", format_goal_details(&goal, Utc::now(), settings));
        }

        GoalCommands::List => {
            let goals = service.list_goals()?;
            if goals.is_empty() {
                println!("No goals yet.");
                println!();
                println!("Use 'goals goal create <name> --target <amount>' to create one.");
            } else {
                print!("{}", format_goal_list(&goals, settings));
            }
        }

        GoalCommands::Show { tag } => {
            let goal = service.get_goal(&tag)?;
            print!("{}", format_goal_details(&goal, Utc::now(), settings));
        }

        GoalCommands::Delete { tag } => {
            let goal = service.delete_goal(&tag)?;
            println!("Deleted goal '{}'.", goal.tag);
        }
    }

    Ok(())
}

/// Parse a date argument to midnight UTC of that day
pub fn parse_date_arg(input: &str, today: NaiveDate) -> GoalResult<DateTime<Utc>> {
    parse_user_date(input, today)
        .map(midnight_utc)
        .ok_or_else(|| {
            GoalError::Validation(format!(
                "Not a date: '{}'. Use today, yesterday, YYYY-MM-DD or D/M/YYYY",
                input
            ))
        })
}

/// Turn the mutually exclusive `--duration` / `--end` pair into a duration
fn parse_duration_args(
    duration: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> GoalResult<Option<GoalDuration>> {
    match (duration, end) {
        (Some(_), Some(_)) => Err(GoalError::Validation(
            "Give either --duration or --end, not both".into(),
        )),
        (Some(text), None) => parse_duration(text)
            .map(|seconds| Some(GoalDuration::Seconds(seconds)))
            .ok_or_else(|| {
                GoalError::Validation(format!(
                    "Not a duration: '{}'. Try \"1 year\", \"6 months\" or \"90d\"",
                    text
                ))
            }),
        (None, Some(text)) => Ok(Some(GoalDuration::Until(parse_date_arg(text, today)?))),
        (None, None) => Ok(None),
    }
}
