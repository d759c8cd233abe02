//! Integration tests for the bufflog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Goal versioning workflow (init, goals, history)
//! - Daily check-in recording and duplicate rejection
//! - Report rendering across goal changes
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bufflog"))
}

fn init_goals(data_dir: &std::path::Path, effective: &str, sleep_goal: &str) {
    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--effective")
        .arg(effective)
        .arg("--sleep-hours")
        .arg(sleep_goal)
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Daily fitness check-in tracker with versioned goals",
        ));
}

#[test]
fn test_init_then_goals() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-01-01", "8.0");

    cli()
        .arg("goals")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("effective 2024-01-01"))
        .stdout(predicate::str::contains("Workouts per week: 4"))
        .stdout(predicate::str::contains("Sleep: 8 hours"));
}

#[test]
fn test_goals_without_init_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("goals")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No goals recorded yet"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_goal_history_lists_all_versions() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-01-01", "8.0");
    init_goals(data_dir, "2024-03-01", "7.0");

    cli()
        .arg("goals")
        .arg("--history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Effective 2024-01-01"))
        .stdout(predicate::str::contains("Effective 2024-03-01"));
}

#[test]
fn test_goal_version_must_be_strictly_later() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-03-01", "8.0");

    // Same effective date
    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--effective")
        .arg("2024-03-01")
        .assert()
        .failure();

    // Earlier effective date
    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--effective")
        .arg("2024-01-01")
        .assert()
        .failure();
}

#[test]
fn test_checkin_recorded_to_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .arg("--sleep")
        .arg("7.5")
        .arg("--wake")
        .arg("06:15")
        .assert()
        .success()
        .stdout(predicate::str::contains("Check-in recorded for 2024-01-03"));

    let log = fs::read_to_string(data_dir.join("checkins.jsonl")).expect("Failed to read log");
    assert!(log.contains("2024-01-03"));
    assert!(log.contains("06:15"));
}

#[test]
fn test_duplicate_checkin_date_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .assert()
        .success();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate"));
}

#[test]
fn test_invalid_weights_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg("2024-01-03")
        .arg("--lift")
        .arg("squat")
        .arg("--weights")
        .arg("very heavy")
        .assert()
        .failure();
}

#[test]
fn test_report_without_checkins() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No check-ins recorded yet"));
}

#[test]
fn test_report_without_goals_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .assert()
        .success();

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog is empty"));
}

#[test]
fn test_report_balance_across_goal_change() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    // 8h goal from January, 7h goal from March
    init_goals(data_dir, "2024-01-01", "8.0");
    init_goals(data_dir, "2024-03-01", "7.0");

    for (date, sleep) in [("2024-02-15", "6.0"), ("2024-03-10", "6.0")] {
        cli()
            .arg("checkin")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .arg("--sleep")
            .arg(sleep)
            .assert()
            .success();
    }

    // -2 against the old goal, -1 against the new one
    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Days recorded: 2"))
        .stdout(predicate::str::contains("Sleep balance: -3.0 h"));
}

#[test]
fn test_report_wake_adherence_undefined_without_wake_times() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-01-01", "8.0");

    // Tue and Thu with no wake time recorded
    for date in ["2024-01-02", "2024-01-04"] {
        cli()
            .arg("checkin")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .arg("--sleep")
            .arg("8.0")
            .assert()
            .success();
    }

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wake adherence: n/a"));
}

#[test]
fn test_report_workout_adherence_badge() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--effective")
        .arg("2024-01-01")
        .arg("--workouts-per-week")
        .arg("3")
        .assert()
        .success();

    // Mon, Wed, Fri workouts in the week of 2024-01-01
    for date in ["2024-01-01", "2024-01-03", "2024-01-05"] {
        cli()
            .arg("checkin")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .arg("--lift")
            .arg("squat")
            .arg("--weights")
            .arg("135x5, 185x3")
            .assert()
            .success();
    }

    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workouts: 3 of 3 ✓"));
}

#[test]
fn test_report_all_weeks_includes_gaps() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-01-01", "8.0");

    for date in ["2024-01-01", "2024-01-22"] {
        cli()
            .arg("checkin")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .assert()
            .success();
    }

    // Default report omits the two empty weeks in between
    cli()
        .arg("report")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 8th").not());

    cli()
        .arg("report")
        .arg("--all-weeks")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 8th"))
        .stdout(predicate::str::contains("Jan 15th"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    init_goals(data_dir, "2024-01-01", "8.0");

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .arg("--sleep")
        .arg("7.0")
        .assert()
        .success();

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 weeks"));

    let csv_path = data_dir.join("weekly.csv");
    assert!(csv_path.exists());
    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.starts_with("week_start,"));
    assert!(contents.contains("2024-01-01"));
}

#[test]
fn test_paths_prints_locations() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("paths")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("checkins.jsonl"))
        .stdout(predicate::str::contains("goals.jsonl"));
}
