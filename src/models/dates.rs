//! Date and duration parsing helpers
//!
//! Ledger files and command-line input both spell dates in a handful of
//! formats. Everything is normalised to midnight UTC of the given day so that
//! goals and transactions compare on a single timeline.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;
pub const SECONDS_PER_MONTH: i64 = 30 * SECONDS_PER_DAY;
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Midnight UTC at the start of `date`
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a ledger date.
///
/// Accepts ISO `YYYY-MM-DD`, day-first `D/M/YYYY` and the short Quicken
/// form `D/M'YY` (two-digit years are taken as 20xx).
pub fn parse_ledger_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some((day_month, year)) = input.split_once('\'') {
        let year = year.trim().parse::<u8>().ok().filter(|year| *year < 100)?;
        let (day, month) = split_day_month(day_month)?;
        return NaiveDate::from_ymd_opt(2000 + i32::from(year), month, day);
    }

    let mut parts = input.split('/').map(str::trim);
    let day = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn split_day_month(input: &str) -> Option<(u32, u32)> {
    let (day, month) = input.split_once('/')?;
    Some((day.trim().parse().ok()?, month.trim().parse().ok()?))
}

/// Parse a user-supplied date relative to `today`.
///
/// Understands `today`, `yesterday` and `tomorrow` in addition to the ledger
/// formats. An empty string means today.
pub fn parse_user_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "" | "today" | "now" => Some(today),
        "yesterday" => today.checked_sub_signed(Duration::days(1)),
        "tomorrow" => today.checked_add_signed(Duration::days(1)),
        other => parse_ledger_date(other),
    }
}

/// Parse a human duration into whole seconds.
///
/// Accepts a bare number of seconds, `<n> <unit>` and compact forms such as
/// `90d`, `2w` or `1y`. Months count as 30 days and years as 365 days.
pub fn parse_duration(input: &str) -> Option<i64> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Some(seconds);
    }

    let split_at = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split_at);
    let number: f64 = number.parse().ok()?;

    let unit_seconds = match unit.trim() {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => SECONDS_PER_MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => SECONDS_PER_HOUR,
        "d" | "day" | "days" => SECONDS_PER_DAY,
        "w" | "wk" | "wks" | "week" | "weeks" => SECONDS_PER_WEEK,
        "mo" | "mon" | "month" | "months" => SECONDS_PER_MONTH,
        "y" | "yr" | "yrs" | "year" | "years" => SECONDS_PER_YEAR,
        _ => return None,
    };

    Some((number * unit_seconds as f64).round() as i64)
}

/// Format a duration in seconds as the largest whole unit that fits
pub fn format_duration(seconds: i64) -> String {
    let units = [
        (SECONDS_PER_YEAR, "year"),
        (SECONDS_PER_MONTH, "month"),
        (SECONDS_PER_WEEK, "week"),
        (SECONDS_PER_DAY, "day"),
        (SECONDS_PER_HOUR, "hour"),
        (SECONDS_PER_MINUTE, "minute"),
    ];

    for (size, name) in units {
        if seconds != 0 && seconds % size == 0 {
            let count = seconds / size;
            let plural = if count.abs() == 1 { "" } else { "s" };
            return format!("{} {}{}", count, name, plural);
        }
    }

    if seconds.abs() >= SECONDS_PER_DAY {
        format!("{:.1} days", seconds as f64 / SECONDS_PER_DAY as f64)
    } else {
        format!("{} seconds", seconds)
    }
}
