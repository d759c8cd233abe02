//! CSV export of weekly aggregates.
//!
//! Writes one row per week for use in spreadsheets. Undefined metrics
//! (no qualifying days) serialize as empty fields, never as zero.

use crate::{Aggregate, ClockTime, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    week_start: String,
    days_with_data: u32,
    avg_sleep_hours: Option<f64>,
    avg_wake_time: Option<String>,
    wake_days_met: u32,
    wake_days_recorded: u32,
    workout_days: u32,
    workouts_goal: u32,
    cardio_minutes: f64,
    cardio_goal_minutes: f64,
    avg_protein_g: Option<f64>,
    avg_calories: Option<f64>,
    avg_steps: Option<f64>,
    mixed_goal: bool,
}

impl From<&Aggregate> for CsvRow {
    fn from(week: &Aggregate) -> Self {
        CsvRow {
            week_start: week.week_start.to_string(),
            days_with_data: week.days_with_data,
            avg_sleep_hours: week.sleep.map(|m| m.mean),
            avg_wake_time: week
                .wake
                .map(|m| ClockTime::from_minutes(m.mean.round() as u32).to_string()),
            wake_days_met: week.wake_days_met,
            wake_days_recorded: week.wake_days_recorded,
            workout_days: week.workout_days,
            workouts_goal: week.goal.workouts_per_week,
            cardio_minutes: week.cardio_minutes_total,
            cardio_goal_minutes: week.goal.cardio_minutes_per_week,
            avg_protein_g: week.protein_g.map(|m| m.mean),
            avg_calories: week.calories.map(|m| m.mean),
            avg_steps: week.steps.map(|m| m.mean),
            mixed_goal: week.mixed_goal,
        }
    }
}

/// Write the weekly aggregates to a CSV file, returning the row count.
///
/// The file is replaced, not appended: the rows are derived data that can
/// always be regenerated from the raw check-in log.
pub fn write_weekly_csv(weeks: &[Aggregate], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for week in weeks {
        writer.serialize(CsvRow::from(week))?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} weekly rows to {:?}", weeks.len(), path);
    Ok(weeks.len())
}
