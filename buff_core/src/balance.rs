//! Running sleep surplus/deficit across the full history.
//!
//! Implemented as a strict left fold over date-ascending records producing
//! a row of partial sums per sleep-bearing date. The same pure function
//! serves full recomputation and checkpoint rebuilds; recomputing from an
//! empty state reproduces any previously computed cumulative value.

use crate::{BalanceEntry, DailyRecord, Error, GoalCatalog, Result};

/// Compute the running sleep balance over `records`.
///
/// Records must be in strictly ascending date order; a duplicate or
/// out-of-order date fails rather than guessing which record wins. Dates
/// without a sleep record neither add to nor reset the balance. Each row's
/// delta is actual sleep minus the sleep goal in effect on that date.
pub fn compute_running_balance(
    records: &[DailyRecord],
    catalog: &GoalCatalog,
) -> Result<Vec<BalanceEntry>> {
    let mut entries = Vec::new();
    let mut cumulative = 0.0;
    let mut prev_date = None;

    for record in records {
        if let Some(prev) = prev_date {
            if record.date == prev {
                return Err(Error::DuplicateDate { date: record.date });
            }
            if record.date < prev {
                return Err(Error::RecordOutOfOrder {
                    date: record.date,
                    latest: prev,
                });
            }
        }
        prev_date = Some(record.date);

        let Some(sleep_hours) = record.sleep_hours else {
            continue;
        };

        let goal = catalog.resolve(record.date)?;
        let delta = sleep_hours - goal.sleep_goal_hours;
        cumulative += delta;
        entries.push(BalanceEntry {
            date: record.date,
            delta,
            cumulative,
        });
    }

    tracing::debug!(
        "Computed running balance over {} sleep-bearing days",
        entries.len()
    );
    Ok(entries)
}
