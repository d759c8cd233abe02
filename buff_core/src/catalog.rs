//! Goal version catalog and resolution.
//!
//! Goals are an append-only, time-ordered sequence of immutable snapshots
//! rather than a mutable "current goals" record. Resolving a date is a pure
//! lookup of the latest version whose effective date is at or before it, so
//! historical weekly comparisons never change retroactively when goals do.

use crate::{Error, GoalVersion, Result};
use chrono::NaiveDate;

/// An ordered, validated sequence of goal versions.
///
/// Invariant: versions are sorted by `effective_date` ascending with no two
/// versions sharing a date. Construction and append both enforce this.
#[derive(Clone, Debug, Default)]
pub struct GoalCatalog {
    versions: Vec<GoalVersion>,
}

impl GoalCatalog {
    /// Build a catalog from an arbitrary list of versions.
    ///
    /// Versions are sorted by effective date; a duplicate effective date
    /// fails construction before any resolution can happen.
    pub fn new(mut versions: Vec<GoalVersion>) -> Result<Self> {
        versions.sort_by_key(|v| v.effective_date);
        for pair in versions.windows(2) {
            if pair[0].effective_date == pair[1].effective_date {
                return Err(Error::DuplicateDate {
                    date: pair[1].effective_date,
                });
            }
        }
        Ok(Self { versions })
    }

    /// Append a new version; its effective date must be strictly after the
    /// latest version already in the catalog.
    pub fn push(&mut self, version: GoalVersion) -> Result<()> {
        if let Some(last) = self.versions.last() {
            if version.effective_date <= last.effective_date {
                return Err(Error::GoalOutOfOrder {
                    date: version.effective_date,
                    latest: last.effective_date,
                });
            }
        }
        tracing::debug!(
            "Appending goal version effective {}",
            version.effective_date
        );
        self.versions.push(version);
        Ok(())
    }

    /// Resolve the goal version in effect on `date`.
    ///
    /// Binary search for the latest version with `effective_date <= date`.
    /// Pure: repeated calls with the same catalog and date always return the
    /// same version.
    pub fn resolve(&self, date: NaiveDate) -> Result<&GoalVersion> {
        if self.versions.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let idx = self
            .versions
            .partition_point(|v| v.effective_date <= date);
        if idx == 0 {
            return Err(Error::NoApplicableGoal { date });
        }
        Ok(&self.versions[idx - 1])
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// The most recent version, i.e. the one currently in effect going forward
    pub fn latest(&self) -> Option<&GoalVersion> {
        self.versions.last()
    }

    /// All versions in ascending effective-date order
    pub fn versions(&self) -> &[GoalVersion] {
        &self.versions
    }
}
