//! Lifetime summary: a pure fold over the weekly aggregates and the final
//! running balance. No per-record logic is re-run here.

use crate::{Aggregate, BalanceEntry, ClockTime, Report};

/// Fold weekly aggregates plus the running balance into the lifetime report.
///
/// Lifetime means are weighted by each week's present-day counts, so they
/// equal the means that would be computed over all records directly. Mean
/// workouts per week is the mean of per-week workout counts. Wake time uses
/// a simple clock mean; values are assumed not to wrap past midnight.
pub fn summarize(weeks: Vec<Aggregate>, balance: Vec<BalanceEntry>) -> Report {
    let total_days: u32 = weeks.iter().map(|w| w.days_with_data).sum();

    let mean_sleep_hours = weighted_mean(weeks.iter().filter_map(|w| w.sleep));
    let mean_wake_time = weighted_mean(weeks.iter().filter_map(|w| w.wake))
        .map(|m| ClockTime::from_minutes(m.round() as u32));

    let mean_workouts_per_week = if weeks.is_empty() {
        None
    } else {
        let total: u32 = weeks.iter().map(|w| w.workout_days).sum();
        Some(total as f64 / weeks.len() as f64)
    };

    let sleep_balance = balance.last().map(|e| e.cumulative);

    Report {
        total_days,
        mean_sleep_hours,
        mean_workouts_per_week,
        mean_wake_time,
        sleep_balance,
        balance,
        weeks,
    }
}

/// Mean over weekly means, weighted by the number of days behind each one.
/// `None` when no week carries the metric.
fn weighted_mean(means: impl Iterator<Item = crate::MetricMean>) -> Option<f64> {
    let mut days = 0u32;
    let mut sum = 0.0;
    for m in means {
        days += m.days;
        sum += m.mean * m.days as f64;
    }
    if days == 0 {
        None
    } else {
        Some(sum / days as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GoalVersion, MetricMean};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal() -> GoalVersion {
        GoalVersion {
            effective_date: date(2024, 1, 1),
            workouts_per_week: 3,
            wake_time_goal: "06:30".parse().unwrap(),
            sleep_goal_hours: 8.0,
            cardio_minutes_per_week: 150.0,
            protein_goal_g: 150.0,
            calorie_goal: 2500,
            steps_goal: 10000,
        }
    }

    fn week(start: NaiveDate, days: u32, sleep: Option<MetricMean>, workouts: u32) -> Aggregate {
        Aggregate {
            week_start: start,
            days_with_data: days,
            sleep,
            protein_g: None,
            calories: None,
            steps: None,
            wake: None,
            cardio_minutes_total: 0.0,
            workout_days: workouts,
            wake_days_met: 0,
            wake_days_recorded: 0,
            goal: goal(),
            mixed_goal: false,
        }
    }

    #[test]
    fn test_empty_history() {
        let report = summarize(vec![], vec![]);
        assert_eq!(report.total_days, 0);
        assert_eq!(report.mean_sleep_hours, None);
        assert_eq!(report.mean_workouts_per_week, None);
        assert_eq!(report.mean_wake_time, None);
        assert_eq!(report.sleep_balance, None);
        assert!(report.weeks.is_empty());
    }

    #[test]
    fn test_lifetime_sleep_mean_is_day_weighted() {
        // Week 1: 2 days at 6h; week 2: 4 days at 9h. Day-weighted mean is
        // (2*6 + 4*9) / 6 = 8, not the unweighted 7.5.
        let weeks = vec![
            week(
                date(2024, 1, 1),
                2,
                Some(MetricMean { days: 2, mean: 6.0 }),
                0,
            ),
            week(
                date(2024, 1, 8),
                4,
                Some(MetricMean { days: 4, mean: 9.0 }),
                0,
            ),
        ];

        let report = summarize(weeks, vec![]);
        assert_eq!(report.total_days, 6);
        assert!((report.mean_sleep_hours.unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_workouts_is_per_week_not_per_day() {
        let weeks = vec![
            week(date(2024, 1, 1), 7, None, 4),
            week(date(2024, 1, 8), 3, None, 2),
        ];

        let report = summarize(weeks, vec![]);
        assert!((report.mean_workouts_per_week.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_balance_taken_from_last_entry() {
        let balance = vec![
            BalanceEntry {
                date: date(2024, 1, 1),
                delta: -1.0,
                cumulative: -1.0,
            },
            BalanceEntry {
                date: date(2024, 1, 2),
                delta: 0.5,
                cumulative: -0.5,
            },
        ];

        let report = summarize(vec![], balance);
        assert!((report.sleep_balance.unwrap() - (-0.5)).abs() < 1e-9);
        assert_eq!(report.balance.len(), 2);
    }

    #[test]
    fn test_mean_wake_time_renders_as_clock() {
        // 06:00 over 1 day and 07:00 over 1 day -> 06:30
        let mut a = week(date(2024, 1, 1), 1, None, 0);
        a.wake = Some(MetricMean {
            days: 1,
            mean: 360.0,
        });
        let mut b = week(date(2024, 1, 8), 1, None, 0);
        b.wake = Some(MetricMean {
            days: 1,
            mean: 420.0,
        });

        let report = summarize(vec![a, b], vec![]);
        assert_eq!(report.mean_wake_time.unwrap().to_string(), "06:30");
    }
}
