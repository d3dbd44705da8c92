//! Walking back through the tracked file's history within a day window.

use std::num::NonZeroU32;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};

use super::{extract_revision, HistoricalCommitRecord};
use crate::error::HistoryError;
use crate::ports::clock::Clock;
use crate::ports::git::GitRepo;

/// A commit in the window whose value could not be recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCommit {
    /// Commit hash.
    pub commit_id: String,
    /// Why no value was extracted.
    pub reason: String,
}

/// Result of one window scan.
///
/// Commits whose file is absent or lacks the key are listed in `skipped`
/// instead of failing the scan: older revisions of the file may predate the
/// key, and that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowScan {
    /// Commits with an extracted value, newest first, in log order.
    pub records: Vec<HistoricalCommitRecord>,
    /// Commits tolerated without a value.
    pub skipped: Vec<SkippedCommit>,
}

/// Enumerates the values the tracked file held over the last `N` days.
pub struct HistoricalWindowScanner<'a> {
    git: &'a dyn GitRepo,
    clock: &'a dyn Clock,
    path: &'a Path,
    key: &'a str,
}

impl<'a> HistoricalWindowScanner<'a> {
    /// Creates a scanner for `key` in the file at `path`.
    #[must_use]
    pub fn new(git: &'a dyn GitRepo, clock: &'a dyn Clock, path: &'a Path, key: &'a str) -> Self {
        Self { git, clock, path, key }
    }

    /// Start of a window of `days` days ending now.
    ///
    /// Never earlier than the Unix epoch, so a huge `days` covers the whole
    /// history instead of overflowing.
    #[must_use]
    pub fn window_start(&self, days: NonZeroU32) -> DateTime<Utc> {
        Duration::try_days(i64::from(days.get()))
            .and_then(|span| self.clock.now().checked_sub_signed(span))
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |start| start.max(DateTime::<Utc>::UNIX_EPOCH))
    }

    /// Scans commits touching the file since `now - days`.
    ///
    /// Each commit's file is read as of that commit, never from the working
    /// copy. Order is the log's order; equal timestamps are not re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Query`] only if the log query itself fails.
    /// Per-commit read or extraction failures end up in [`WindowScan::skipped`].
    pub fn scan(&self, days: NonZeroU32) -> Result<WindowScan, HistoryError> {
        let since = self.window_start(days);
        let entries = self
            .git
            .commits_since(self.path, since)
            .map_err(|source| HistoryError::Query { path: self.path.to_path_buf(), source })?;

        let mut scan = WindowScan::default();
        for entry in entries {
            let value = self
                .git
                .show_file(&entry.id, self.path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    extract_revision(&content, self.key, self.path).map_err(|e| e.to_string())
                });
            match value {
                Ok(revision_value) => scan.records.push(HistoricalCommitRecord {
                    commit_id: entry.id,
                    commit_timestamp: entry.date,
                    revision_value,
                }),
                Err(reason) => {
                    tracing::debug!(commit = %entry.id, %reason, "skipping historical commit");
                    scan.skipped.push(SkippedCommit { commit_id: entry.id, reason });
                }
            }
        }
        Ok(scan)
    }
}
