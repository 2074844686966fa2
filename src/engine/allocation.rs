//! Allocation of ledger transactions across savings goals
//!
//! Transactions are not tagged with a goal. Instead each one is split between
//! the goals already running on its date, weighted by how much each goal
//! needs to save per day. A goal that must save twice as fast as another
//! receives twice the share.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{GoalError, GoalResult};
use crate::models::{Goal, Transaction};

use super::summation::CompensatedSum;

/// Cumulative savings attributed to one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub tag: String,
    pub savings: f64,
}

/// One goal's portion of a single transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub tag: String,
    pub amount: f64,
}

/// Split every transaction across the goals active on its date and total the
/// shares per goal.
///
/// Returns one result per goal, in the order the goals were given, each
/// seeded with the goal's `start_balance`. The whole call fails without
/// partial results if any goal or transaction is malformed.
pub fn allocate(
    goals: &[Goal],
    transactions: &[Transaction],
) -> GoalResult<Vec<AllocationResult>> {
    check_goals(goals)?;
    check_transactions(transactions)?;

    let rates: Vec<f64> = goals.iter().map(Goal::daily_rate).collect();
    let mut totals: Vec<CompensatedSum> = goals
        .iter()
        .map(|goal| CompensatedSum::new(goal.start_balance))
        .collect();

    let mut unallocated = 0usize;
    for transaction in transactions {
        match split_by_rate(goals, &rates, transaction) {
            Some(shares) => {
                for (index, share) in shares {
                    totals[index].add(share);
                }
            }
            None => unallocated += 1,
        }
    }

    debug!(
        goals = goals.len(),
        transactions = transactions.len(),
        unallocated,
        "allocated transactions to goals"
    );

    Ok(goals
        .iter()
        .zip(totals)
        .map(|(goal, total)| AllocationResult {
            tag: goal.tag.clone(),
            savings: total.value(),
        })
        .collect())
}

/// The shares a single transaction contributes to each active goal.
///
/// Empty when no goal is active on the transaction's date or when the active
/// goals' daily rates sum to zero.
pub fn split(goals: &[Goal], transaction: &Transaction) -> Vec<Share> {
    let rates: Vec<f64> = goals.iter().map(Goal::daily_rate).collect();

    split_by_rate(goals, &rates, transaction)
        .unwrap_or_default()
        .into_iter()
        .map(|(index, amount)| Share {
            tag: goals[index].tag.clone(),
            amount,
        })
        .collect()
}

/// Returns `(goal index, share)` pairs, or `None` when nothing is allocated.
fn split_by_rate(
    goals: &[Goal],
    rates: &[f64],
    transaction: &Transaction,
) -> Option<Vec<(usize, f64)>> {
    let active: Vec<usize> = goals
        .iter()
        .enumerate()
        .filter(|(_, goal)| goal.is_active_at(transaction.date))
        .map(|(index, _)| index)
        .collect();

    let total_rate = active
        .iter()
        .map(|&index| rates[index])
        .sum::<CompensatedSum>()
        .value();

    if total_rate == 0.0 {
        if active.is_empty() {
            trace!(date = %transaction.date, "no active goals, transaction not allocated");
        } else {
            warn!(
                date = %transaction.date,
                amount = transaction.amount,
                active = active.len(),
                "active goals have a zero total daily rate, transaction not allocated"
            );
        }
        return None;
    }

    Some(
        active
            .into_iter()
            .map(|index| (index, transaction.amount * (rates[index] / total_rate)))
            .collect(),
    )
}

fn check_goals(goals: &[Goal]) -> GoalResult<()> {
    for goal in goals {
        goal.validate()
            .map_err(|e| GoalError::malformed_goal(&goal.tag, e.to_string()))?;
    }
    Ok(())
}

fn check_transactions(transactions: &[Transaction]) -> GoalResult<()> {
    match transactions.iter().find(|t| !t.amount.is_finite()) {
        Some(bad) => Err(GoalError::MalformedTransaction {
            date: bad.date.format("%Y-%m-%d").to_string(),
            reason: format!("amount {} is not a finite number", bad.amount),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dates::{SECONDS_PER_DAY, SECONDS_PER_YEAR};
    use crate::models::GoalDuration;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn goal(tag: &str, start: DateTime<Utc>, start_balance: f64, end_balance: f64) -> Goal {
        Goal::new(
            tag,
            start,
            GoalDuration::Seconds(SECONDS_PER_YEAR),
            start_balance,
            end_balance,
        )
    }

    fn savings_of(results: &[AllocationResult], tag: &str) -> f64 {
        results.iter().find(|r| r.tag == tag).unwrap().savings
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_proportional_split_by_daily_rate() {
        let goals = vec![
            goal("A", day(2024, 1, 1), 0.0, 3650.0),
            goal("B", day(2024, 1, 1), 0.0, 1825.0),
        ];
        let transactions = vec![Transaction::new(day(2024, 6, 1), 150.0)];

        let results = allocate(&goals, &transactions).unwrap();
        assert_close(savings_of(&results, "A"), 100.0);
        assert_close(savings_of(&results, "B"), 50.0);
    }

    #[test]
    fn test_goal_not_yet_started_is_excluded() {
        let goals = vec![
            goal("early", day(2023, 1, 1), 0.0, 1000.0),
            goal("C", day(2024, 6, 1), 25.0, 1000.0),
        ];
        let transactions = vec![Transaction::new(day(2024, 1, 1), 80.0)];

        let results = allocate(&goals, &transactions).unwrap();
        assert_close(savings_of(&results, "early"), 80.0);
        assert_eq!(savings_of(&results, "C"), 25.0);
    }

    #[test]
    fn test_transaction_on_start_date_is_excluded() {
        let start = day(2024, 1, 1);
        let goals = vec![
            goal("older", day(2023, 1, 1), 0.0, 500.0),
            goal("fresh", start, 0.0, 500.0),
        ];
        let transactions = vec![Transaction::new(start, 40.0)];

        let shares = split(&goals, &transactions[0]);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].tag, "older");

        let results = allocate(&goals, &transactions).unwrap();
        assert_eq!(savings_of(&results, "fresh"), 0.0);
        assert_close(savings_of(&results, "older"), 40.0);
    }

    #[test]
    fn test_no_transactions_keeps_start_balance() {
        let goals = vec![
            goal("a", day(2024, 1, 1), 120.0, 1000.0),
            goal("b", day(2024, 2, 1), -30.0, 0.0),
        ];

        let results = allocate(&goals, &[]).unwrap();
        assert_eq!(savings_of(&results, "a"), 120.0);
        assert_eq!(savings_of(&results, "b"), -30.0);
    }

    #[test]
    fn test_results_follow_goal_order() {
        let goals = vec![
            goal("z", day(2024, 1, 1), 0.0, 10.0),
            goal("a", day(2024, 1, 1), 0.0, 10.0),
        ];
        let results = allocate(&goals, &[]).unwrap();
        let tags: Vec<_> = results.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, ["z", "a"]);
    }

    #[test]
    fn test_zero_rate_goal_never_receives_a_share() {
        let goals = vec![
            goal("flat", day(2024, 1, 1), 500.0, 500.0),
            goal("growing", day(2024, 1, 1), 0.0, 365.0),
        ];
        let transactions = vec![
            Transaction::new(day(2024, 2, 1), 100.0),
            Transaction::new(day(2024, 3, 1), -40.0),
            Transaction::new(day(2024, 4, 1), 12.34),
        ];

        for transaction in &transactions {
            let shares = split(&goals, transaction);
            let flat = shares.iter().find(|s| s.tag == "flat").unwrap();
            assert_eq!(flat.amount, 0.0);
        }

        let results = allocate(&goals, &transactions).unwrap();
        assert_eq!(savings_of(&results, "flat"), 500.0);
        assert_close(savings_of(&results, "growing"), 72.34);
    }

    #[test]
    fn test_only_zero_rate_goals_allocates_nothing() {
        let goals = vec![goal("flat", day(2024, 1, 1), 10.0, 10.0)];
        let transactions = vec![Transaction::new(day(2024, 5, 1), 99.0)];

        assert!(split(&goals, &transactions[0]).is_empty());
        let results = allocate(&goals, &transactions).unwrap();
        assert_eq!(savings_of(&results, "flat"), 10.0);
        assert!(!results[0].savings.is_nan());
    }

    #[test]
    fn test_cancelling_rates_allocate_nothing() {
        let goals = vec![
            goal("up", day(2024, 1, 1), 0.0, 365.0),
            goal("down", day(2024, 1, 1), 365.0, 0.0),
        ];
        let transactions = vec![Transaction::new(day(2024, 3, 1), 50.0)];

        let results = allocate(&goals, &transactions).unwrap();
        assert_eq!(savings_of(&results, "up"), 0.0);
        assert_eq!(savings_of(&results, "down"), 365.0);
        assert!(results.iter().all(|r| r.savings.is_finite()));
    }

    #[test]
    fn test_no_active_goals_allocates_nothing() {
        let goals = vec![goal("later", day(2025, 1, 1), 0.0, 100.0)];
        let transactions = vec![Transaction::new(day(2024, 1, 1), 50.0)];

        let results = allocate(&goals, &transactions).unwrap();
        assert_eq!(savings_of(&results, "later"), 0.0);
    }

    #[test]
    fn test_mixed_sign_rates_are_not_clamped() {
        // Rates 20 and -10 per day: weights 2 and -1.
        let goals = vec![
            goal("save", day(2024, 1, 1), 0.0, 7300.0),
            goal("spend", day(2024, 1, 1), 3650.0, 0.0),
        ];
        let transactions = vec![Transaction::new(day(2024, 2, 1), 100.0)];

        let results = allocate(&goals, &transactions).unwrap();
        assert_close(savings_of(&results, "save"), 200.0);
        assert_close(savings_of(&results, "spend"), 3650.0 - 100.0);
    }

    #[test]
    fn test_shares_conserve_transaction_amount() {
        let goals = vec![
            goal("a", day(2024, 1, 1), 0.0, 1234.5),
            goal("b", day(2024, 1, 15), 100.0, 50.0),
            goal("c", day(2024, 2, 1), 0.0, 99.99),
            Goal::new(
                "d",
                day(2024, 1, 10),
                GoalDuration::Seconds(45 * SECONDS_PER_DAY),
                10.0,
                4000.0,
            ),
        ];

        for amount in [150.0, -73.21, 0.01, 98765.4321] {
            let transaction = Transaction::new(day(2024, 3, 1), amount);
            let shares = split(&goals, &transaction);
            assert_eq!(shares.len(), 4);

            let total: f64 = shares.iter().map(|s| s.amount).sum::<CompensatedSum>().value();
            assert_close(total, amount);
        }
    }

    #[test]
    fn test_order_independence() {
        let goals = vec![
            goal("a", day(2024, 1, 1), 0.0, 1234.5),
            goal("b", day(2024, 1, 15), 100.0, 50.0),
            goal("c", day(2024, 2, 1), 20.0, 99.99),
            goal("d", day(2024, 3, 1), 0.0, 7000.0),
        ];
        let transactions: Vec<Transaction> = (0..60)
            .map(|i| {
                let amount = if i % 3 == 0 { -17.5 } else { 33.3 + i as f64 };
                Transaction::new(day(2024, 1, 1) + chrono::Duration::days(i * 3), amount)
            })
            .collect();

        let baseline = allocate(&goals, &transactions).unwrap();

        let mut reversed_goals = goals.clone();
        reversed_goals.reverse();
        let mut reversed_transactions = transactions.clone();
        reversed_transactions.reverse();
        let mut rotated_transactions = transactions.clone();
        rotated_transactions.rotate_left(17);

        for (g, t) in [
            (&reversed_goals, &transactions),
            (&goals, &reversed_transactions),
            (&reversed_goals, &rotated_transactions),
        ] {
            let permuted = allocate(g, t).unwrap();
            for expected in &baseline {
                assert_close(savings_of(&permuted, &expected.tag), expected.savings);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let goals = vec![
            goal("a", day(2024, 1, 1), 0.0, 1000.0),
            goal("b", day(2024, 1, 1), 0.0, 3000.0),
        ];
        let transactions = vec![
            Transaction::new(day(2024, 2, 1), 10.0),
            Transaction::new(day(2024, 3, 1), 20.0),
        ];

        let first = allocate(&goals, &transactions).unwrap();
        let second = allocate(&goals, &transactions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_goal_aborts() {
        let mut broken = goal("broken", day(2024, 1, 1), 0.0, 10.0);
        broken.duration_in_seconds = 0;
        let goals = vec![goal("fine", day(2024, 1, 1), 0.0, 10.0), broken];

        let err = allocate(&goals, &[Transaction::new(day(2024, 2, 1), 5.0)]).unwrap_err();
        assert!(matches!(err, GoalError::MalformedGoal { ref tag, .. } if tag == "broken"));
    }

    #[test]
    fn test_non_finite_amount_aborts() {
        let goals = vec![goal("fine", day(2024, 1, 1), 0.0, 10.0)];
        let transactions = vec![
            Transaction::new(day(2024, 2, 1), 5.0),
            Transaction::new(day(2024, 2, 2), f64::NAN),
        ];

        let err = allocate(&goals, &transactions).unwrap_err();
        assert!(matches!(err, GoalError::MalformedTransaction { .. }));
    }
}
