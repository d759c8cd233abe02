//! Report construction: the engine's single entry point.
//!
//! Wires validation, week bucketing, per-week aggregation, the running
//! sleep balance, and the lifetime fold into one synchronous pass over
//! fully materialized inputs. No I/O happens here.

use crate::{
    aggregate::aggregate,
    balance::compute_running_balance,
    summary::summarize,
    week::{bucketize, bucketize_filled},
    DailyRecord, Error, GoalCatalog, Report, Result,
};
use chrono::Weekday;

/// Build the full lifetime report from records and the goal catalog.
///
/// Records may arrive in any order; they are sorted by date here. Duplicate
/// dates fail with `DuplicateDate` (the store should have rejected them),
/// and an empty catalog fails with `EmptyCatalog` before any work is done.
/// Weeks with no records are omitted.
pub fn build_report(
    records: &[DailyRecord],
    catalog: &GoalCatalog,
    week_start: Weekday,
) -> Result<Report> {
    build_report_inner(records, catalog, week_start, false)
}

/// Like [`build_report`], but every week between the first and last record
/// appears in the output, empty ones carrying zero counts. Used for gap
/// reporting; empty weeks also enter the mean-workouts-per-week denominator.
pub fn build_report_filled(
    records: &[DailyRecord],
    catalog: &GoalCatalog,
    week_start: Weekday,
) -> Result<Report> {
    build_report_inner(records, catalog, week_start, true)
}

fn build_report_inner(
    records: &[DailyRecord],
    catalog: &GoalCatalog,
    week_start: Weekday,
    include_empty_weeks: bool,
) -> Result<Report> {
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let mut records: Vec<DailyRecord> = records.to_vec();
    records.sort_by_key(|r| r.date);
    for pair in records.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(Error::DuplicateDate { date: pair[1].date });
        }
    }

    let buckets = if include_empty_weeks {
        bucketize_filled(&records, week_start)
    } else {
        bucketize(&records, week_start)
    };
    let mut weeks = Vec::with_capacity(buckets.len());
    for bucket in &buckets {
        weeks.push(aggregate(bucket, catalog)?);
    }

    let balance = compute_running_balance(&records, catalog)?;

    tracing::info!(
        "Built report: {} days across {} weeks",
        records.len(),
        weeks.len()
    );

    Ok(summarize(weeks, balance))
}
