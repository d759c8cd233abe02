//! Calendar-week bucketing of daily records.
//!
//! Records are partitioned into disjoint 7-day buckets keyed by the week's
//! start date. The weekday that begins a week is a configuration option and
//! must be applied consistently across a run.

use crate::{DailyRecord, WeekBucket};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// The start date of the week containing `date`, for the configured
/// week-start weekday.
pub fn week_start_for(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    date - Duration::days(offset as i64)
}

/// Partition records into calendar-week buckets, ascending by week start.
///
/// Every record lands in exactly one bucket. Weeks with no records are
/// simply absent; use [`bucketize_filled`] to materialize them.
pub fn bucketize(records: &[DailyRecord], week_start: Weekday) -> Vec<WeekBucket<'_>> {
    let mut by_week: BTreeMap<NaiveDate, Vec<&DailyRecord>> = BTreeMap::new();
    for record in records {
        by_week
            .entry(week_start_for(record.date, week_start))
            .or_default()
            .push(record);
    }

    by_week
        .into_iter()
        .map(|(start, mut records)| {
            records.sort_by_key(|r| r.date);
            WeekBucket {
                week_start: start,
                records,
            }
        })
        .collect()
}

/// Like [`bucketize`], but every week between the first and last record
/// appears, empty weeks carrying no records. Used for gap reporting.
pub fn bucketize_filled(records: &[DailyRecord], week_start: Weekday) -> Vec<WeekBucket<'_>> {
    let buckets = bucketize(records, week_start);
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return buckets;
    };

    let (first, last) = (first.week_start, last.week_start);
    let mut by_start: BTreeMap<NaiveDate, WeekBucket<'_>> =
        buckets.into_iter().map(|b| (b.week_start, b)).collect();

    let mut filled = Vec::new();
    let mut start = first;
    while start <= last {
        filled.push(by_start.remove(&start).unwrap_or(WeekBucket {
            week_start: start,
            records: Vec::new(),
        }));
        start = start + Duration::days(7);
    }
    filled
}
