//! Per-bucket aggregation against the resolved goal.
//!
//! Means are computed only over days where a metric is present; missing
//! days are excluded, never treated as zero. Cardio is a weekly sum.
//! A bucket spanning a goal change is aggregated under the goal in effect
//! on its week start and flagged as mixed so renderers can annotate it.

use crate::{Aggregate, Error, GoalCatalog, MetricMean, Result, WeekBucket};

/// Count and mean over the present values; `None` when nothing is present
fn metric_mean(values: impl Iterator<Item = f64>) -> Option<MetricMean> {
    let mut days = 0u32;
    let mut sum = 0.0;
    for v in values {
        days += 1;
        sum += v;
    }
    if days == 0 {
        None
    } else {
        Some(MetricMean {
            days,
            mean: sum / days as f64,
        })
    }
}

/// Aggregate one week bucket against the goal resolved for its start date.
///
/// The first week of history may start before the earliest goal version
/// even though all of its records fall on or after it (goals rarely take
/// effect exactly on a week-start day); in that case the goal resolved for
/// the bucket's earliest record is used instead. Fails with
/// `NoApplicableGoal` only when a record itself precedes every version.
pub fn aggregate(bucket: &WeekBucket<'_>, catalog: &GoalCatalog) -> Result<Aggregate> {
    let goal = match catalog.resolve(bucket.week_start) {
        Ok(goal) => goal.clone(),
        Err(Error::NoApplicableGoal { date }) => match bucket.records.first() {
            Some(first) => catalog.resolve(first.date)?.clone(),
            None => return Err(Error::NoApplicableGoal { date }),
        },
        Err(e) => return Err(e),
    };

    // The bucket is mixed when any day resolves to a different version than
    // the week start does. We still aggregate under the week-start goal
    // rather than averaging two targets.
    let mut mixed_goal = false;
    for record in &bucket.records {
        if catalog.resolve(record.date)?.effective_date != goal.effective_date {
            mixed_goal = true;
            break;
        }
    }

    let records = &bucket.records;
    let sleep = metric_mean(records.iter().filter_map(|r| r.sleep_hours));
    let protein_g = metric_mean(records.iter().filter_map(|r| r.protein_g));
    let calories = metric_mean(records.iter().filter_map(|r| r.calories.map(f64::from)));
    let steps = metric_mean(records.iter().filter_map(|r| r.steps.map(f64::from)));
    let wake = metric_mean(
        records
            .iter()
            .filter_map(|r| r.wake_time.map(|t| t.minutes_from_midnight() as f64)),
    );

    let cardio_minutes_total: f64 = records
        .iter()
        .filter_map(|r| r.cardio.as_ref().map(|c| c.duration_minutes))
        .sum();

    let workout_days = records.iter().filter(|r| r.workout.is_some()).count() as u32;

    let mut wake_days_met = 0u32;
    let mut wake_days_recorded = 0u32;
    for record in records {
        if let Some(wake_time) = record.wake_time {
            wake_days_recorded += 1;
            // Earlier than or equal to the goal counts as met
            if wake_time <= goal.wake_time_goal {
                wake_days_met += 1;
            }
        }
    }

    Ok(Aggregate {
        week_start: bucket.week_start,
        days_with_data: records.len() as u32,
        sleep,
        protein_g,
        calories,
        steps,
        wake,
        cardio_minutes_total,
        workout_days,
        wake_days_met,
        wake_days_recorded,
        goal,
        mixed_goal,
    })
}
