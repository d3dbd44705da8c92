//! Git repository port for version-control operations on one working copy.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// One line of a file-history log query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Full commit hash.
    pub id: String,
    /// Committer date as `YYYY-MM-DD HH:MM:SS ±HHMM`.
    pub date: String,
}

/// Provides read and sync access to a single git working copy.
///
/// Every method operates on the same working copy, which is bound when the
/// implementation is constructed. Checkout and reset mutate that copy, so
/// callers must not drive two branches through one `GitRepo` concurrently.
pub trait GitRepo: Send + Sync {
    /// Fetches all refs from `remote`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn fetch(&self, remote: &str) -> Result<(), PortError>;

    /// Checks out `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or the checkout is refused.
    fn checkout(&self, branch: &str) -> Result<(), PortError>;

    /// Hard-resets the current branch to `target` (e.g. `origin/main`).
    ///
    /// # Errors
    ///
    /// Returns an error if `target` cannot be resolved.
    fn reset_hard(&self, target: &str) -> Result<(), PortError>;

    /// Returns the committer date of the newest commit touching `path`.
    ///
    /// `Ok(None)` means the query ran but no commit touched the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the log query itself fails.
    fn last_commit_date(&self, path: &Path) -> Result<Option<String>, PortError>;

    /// Returns the hash of the newest commit touching `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log query itself fails.
    fn last_commit_id(&self, path: &Path) -> Result<Option<String>, PortError>;

    /// Lists commits touching `path` with commit time at or after `since`,
    /// newest first, in the order git reports them.
    ///
    /// # Errors
    ///
    /// Returns an error if the log query fails or its output is malformed.
    fn commits_since(
        &self,
        path: &Path,
        since: DateTime<Utc>,
    ) -> Result<Vec<LogEntry>, PortError>;

    /// Returns the content of `path` as of commit `rev`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file did not exist at `rev`.
    fn show_file(&self, rev: &str, path: &Path) -> Result<String, PortError>;
}
