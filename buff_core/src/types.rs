//! Core domain types for the bufflog tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Daily check-in records and their optional metric fields
//! - Goal versions (immutable snapshots of weekly targets)
//! - Derived aggregation types (week buckets, aggregates, balance rows)
//! - The top-level report returned to rendering collaborators

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Clock Time
// ============================================================================

/// A time of day with minute precision, stored and rendered as `HH:MM`.
///
/// Ordering is plain clock order; no wrapping past midnight is assumed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a clock time, validating the hour/minute ranges
    pub fn new(hour: u8, minute: u8) -> Result<Self, String> {
        if hour > 23 {
            return Err(format!("hour out of range: {}", hour));
        }
        if minute > 59 {
            return Err(format!("minute out of range: {}", minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight, used for clock-time averaging
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Build a clock time from minutes since midnight (truncated to a day)
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % (24 * 60);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| format!("time must be in HH:MM format, got '{}'", s))?;
        let hour: u8 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid hour in '{}'", s))?;
        let minute: u8 = m
            .trim()
            .parse()
            .map_err(|_| format!("invalid minute in '{}'", s))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

// ============================================================================
// Daily Record Types
// ============================================================================

/// One set of a lift: weight (always stored in lbs) and rep count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightSet {
    pub weight_lbs: f64,
    pub reps: u32,
}

/// A logged workout for one day.
///
/// `block_week` and `block_day` are the user's position in their training
/// program. They are metadata only; calendar weeks are the aggregation unit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub block_week: u32,
    pub block_day: u32,
    pub primary_lift: String,
    #[serde(default)]
    pub sets: Vec<WeightSet>,
}

/// A logged cardio session for one day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cardio {
    pub medium: String,
    pub duration_minutes: f64,
    pub zone: u8,
}

/// One day's check-in. Immutable once created; at most one record per date.
///
/// Every metric is optional. A missing field means the user did not record
/// that metric, which is distinct from recording a zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub wake_time: Option<ClockTime>,
    pub sleep_hours: Option<f64>,
    pub workout: Option<Workout>,
    pub cardio: Option<Cardio>,
    pub protein_g: Option<f64>,
    pub calories: Option<u32>,
    pub steps: Option<u32>,
}

impl DailyRecord {
    /// An empty record for the given date
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            wake_time: None,
            sleep_hours: None,
            workout: None,
            cardio: None,
            protein_g: None,
            calories: None,
            steps: None,
        }
    }
}

// ============================================================================
// Goal Types
// ============================================================================

/// An immutable snapshot of weekly targets, effective from `effective_date`
/// until superseded by the next version in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalVersion {
    pub effective_date: NaiveDate,
    pub workouts_per_week: u32,
    pub wake_time_goal: ClockTime,
    pub sleep_goal_hours: f64,
    pub cardio_minutes_per_week: f64,
    pub protein_goal_g: f64,
    pub calorie_goal: u32,
    pub steps_goal: u32,
}

// ============================================================================
// Derived Aggregation Types
// ============================================================================

/// A calendar week's worth of records, `[week_start, week_start + 7d)`.
///
/// Ephemeral: borrows from the record slice it was bucketized from.
#[derive(Clone, Debug)]
pub struct WeekBucket<'a> {
    pub week_start: NaiveDate,
    pub records: Vec<&'a DailyRecord>,
}

/// Count and arithmetic mean of a metric over the days it was recorded.
///
/// Days without the metric are excluded entirely; a metric with zero
/// recorded days has no `MetricMean` at all (`None` at the use site),
/// never a zeroed one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricMean {
    pub days: u32,
    pub mean: f64,
}

/// Weekly aggregate of one bucket against its resolved goal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aggregate {
    pub week_start: NaiveDate,
    /// Number of days in the bucket with any record at all
    pub days_with_data: u32,
    pub sleep: Option<MetricMean>,
    pub protein_g: Option<MetricMean>,
    pub calories: Option<MetricMean>,
    pub steps: Option<MetricMean>,
    /// Mean wake time in minutes since midnight, over days with a wake time
    pub wake: Option<MetricMean>,
    /// Cardio is a weekly total (minutes), not a mean
    pub cardio_minutes_total: f64,
    /// Distinct days in the bucket with a workout logged
    pub workout_days: u32,
    /// Days whose wake time was at or before the goal
    pub wake_days_met: u32,
    pub wake_days_recorded: u32,
    /// The goal version in effect on `week_start`
    pub goal: GoalVersion,
    /// True when the bucket spans a goal change; the aggregate still uses
    /// the `week_start` goal, and renderers should annotate the week
    pub mixed_goal: bool,
}

impl Aggregate {
    /// Fraction of wake-recorded days that met the wake goal.
    ///
    /// `None` when no day in the bucket recorded a wake time; that is an
    /// undefined ratio, not 0%.
    pub fn wake_adherence(&self) -> Option<f64> {
        if self.wake_days_recorded == 0 {
            None
        } else {
            Some(self.wake_days_met as f64 / self.wake_days_recorded as f64)
        }
    }

    /// Whether the workout-day count met the weekly target
    pub fn workouts_met(&self) -> bool {
        self.workout_days >= self.goal.workouts_per_week
    }

    /// Whether the cardio total met the weekly target
    pub fn cardio_met(&self) -> bool {
        self.cardio_minutes_total >= self.goal.cardio_minutes_per_week
    }
}

/// One row of the running sleep balance: the day's surplus/deficit against
/// the goal in effect on that date, and the cumulative balance so far
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BalanceEntry {
    pub date: NaiveDate,
    pub delta: f64,
    pub cumulative: f64,
}

// ============================================================================
// Report
// ============================================================================

/// The render-agnostic lifetime report. Formatting, coloring, and badges
/// belong to the rendering collaborator, not here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub total_days: u32,
    pub mean_sleep_hours: Option<f64>,
    pub mean_workouts_per_week: Option<f64>,
    pub mean_wake_time: Option<ClockTime>,
    /// Final cumulative sleep balance; `None` when no sleep was ever recorded
    pub sleep_balance: Option<f64>,
    /// Full running balance, one row per sleep-bearing date in order
    pub balance: Vec<BalanceEntry>,
    /// Weekly aggregates in ascending `week_start` order
    pub weeks: Vec<Aggregate>,
}
