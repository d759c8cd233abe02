//! Append-only JSONL stores for check-ins and goal versions.
//!
//! Both logs are plain JSON Lines files guarded by fs2 file locks. The
//! stores enforce the boundary invariants the engine relies on: a check-in
//! append rejects a date that already has a record, and a goal append
//! rejects an effective date that is not strictly after the latest version.

use crate::{DailyRecord, Error, GoalCatalog, GoalVersion, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Parse every line of an open JSONL file, warning and skipping lines that
/// fail to parse rather than losing the whole log.
fn read_lines<T: DeserializeOwned>(file: &File, what: &str) -> Result<Vec<T>> {
    let reader = BufReader::new(file);
    let mut items = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!("Failed to parse {} at line {}: {}", what, line_num + 1, e);
            }
        }
    }

    Ok(items)
}

fn append_line<T: Serialize>(file: &File, item: &T) -> Result<()> {
    let mut writer = std::io::BufWriter::new(file);
    let line = serde_json::to_string(item)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

// ============================================================================
// Check-in store
// ============================================================================

/// Append-only store of daily check-in records
pub struct CheckinStore {
    path: PathBuf,
}

impl CheckinStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, rejecting a date that already has one.
    ///
    /// Duplicate dates are refused here at the boundary so the engine never
    /// has to guess which of two records for a day wins.
    pub fn append(&self, record: &DailyRecord) -> Result<()> {
        ensure_parent_dir(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock covers both the duplicate check and the write
        file.lock_exclusive()?;

        file.seek(SeekFrom::Start(0))?;
        let existing: Vec<DailyRecord> = read_lines(&file, "check-in")?;
        if existing.iter().any(|r| r.date == record.date) {
            file.unlock()?;
            return Err(Error::DuplicateDate { date: record.date });
        }

        append_line(&file, record)?;
        file.unlock()?;

        tracing::debug!("Appended check-in for {} to store", record.date);
        Ok(())
    }

    /// Load all records sorted by date ascending.
    ///
    /// A duplicate date in the file is an invariant violation (the store
    /// should have rejected it) and fails the load.
    pub fn load(&self) -> Result<Vec<DailyRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;
        let mut records: Vec<DailyRecord> = read_lines(&file, "check-in")?;
        file.unlock()?;

        records.sort_by_key(|r| r.date);
        for pair in records.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(Error::DuplicateDate { date: pair[1].date });
            }
        }

        tracing::debug!("Loaded {} check-ins from store", records.len());
        Ok(records)
    }
}

// ============================================================================
// Goal store
// ============================================================================

/// Append-only store of goal versions
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a goal version whose effective date is strictly after the
    /// latest version already persisted.
    pub fn append(&self, goal: &GoalVersion) -> Result<()> {
        ensure_parent_dir(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        file.seek(SeekFrom::Start(0))?;
        let existing: Vec<GoalVersion> = read_lines(&file, "goal version")?;
        if let Some(latest) = existing.iter().map(|g| g.effective_date).max() {
            if goal.effective_date <= latest {
                file.unlock()?;
                return Err(Error::GoalOutOfOrder {
                    date: goal.effective_date,
                    latest,
                });
            }
        }

        append_line(&file, goal)?;
        file.unlock()?;

        tracing::debug!(
            "Appended goal version effective {} to store",
            goal.effective_date
        );
        Ok(())
    }

    /// Load the persisted versions as a validated catalog
    pub fn load(&self) -> Result<GoalCatalog> {
        if !self.path.exists() {
            return GoalCatalog::new(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;
        let versions: Vec<GoalVersion> = read_lines(&file, "goal version")?;
        file.unlock()?;

        tracing::debug!("Loaded {} goal versions from store", versions.len());
        GoalCatalog::new(versions)
    }
}
