//! Error taxonomy.
//!
//! [`RunError`] is fatal and changes the exit code. [`BranchError`] is
//! caught at the branch boundary: the branch contributes no records and the
//! run continues with the next branch.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ports::git::PortError;

/// Which step of branch synchronization failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    /// `git fetch <remote>`.
    Fetch,
    /// `git checkout <branch>`.
    Checkout,
    /// `git reset --hard <remote>/<branch>`.
    Reset,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Checkout => "checkout",
            Self::Reset => "reset",
        })
    }
}

/// Bringing the working copy onto a branch failed.
#[derive(Debug, Error)]
#[error("{step} failed for branch '{branch}': {source}")]
pub struct SyncError {
    /// Branch being synchronized.
    pub branch: String,
    /// Step that failed.
    pub step: SyncStep,
    /// Underlying git failure.
    #[source]
    pub source: PortError,
}

/// The revision value could not be pulled out of the tracked file.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: PortError,
    },
    /// No line assigns the key.
    #[error("{key} not found in '{}'", path.display())]
    KeyNotFound {
        /// Key that was searched for.
        key: String,
        /// File that was searched.
        path: PathBuf,
    },
    /// The key is assigned but the value is blank after unquoting.
    #[error("{key} has an empty value in '{}'", path.display())]
    EmptyValue {
        /// Key whose value was empty.
        key: String,
        /// File that was searched.
        path: PathBuf,
    },
}

/// The commit history of the tracked file could not be determined.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No commit on the current checkout touched the file.
    #[error("no commit touches '{}'", path.display())]
    NoCommits {
        /// Tracked file.
        path: PathBuf,
    },
    /// The log query failed.
    #[error("history query for '{}' failed: {source}", path.display())]
    Query {
        /// Tracked file.
        path: PathBuf,
        /// Underlying git failure.
        #[source]
        source: PortError,
    },
}

/// A timestamp did not match `YYYY-MM-DD HH:MM:SS ±HHMM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse date '{input}': {reason}")]
pub struct TimestampParseError {
    /// Offending input.
    pub input: String,
    /// What was wrong with it.
    pub reason: String,
}

/// Any failure that aborts one branch but not the run.
#[derive(Debug, Error)]
pub enum BranchError {
    /// Synchronization failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// The tip value could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// The tip commit could not be found.
    #[error(transparent)]
    History(#[from] HistoryError),
    /// The tip timestamp could not be normalized.
    #[error(transparent)]
    Timestamp(#[from] TimestampParseError),
}

/// Bad invocation or environment, detected before any branch is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The directory argument does not exist.
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),
    /// The directory argument is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// The process working directory could not be determined.
    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    /// An environment filter named something other than int, stg or prod.
    #[error("unknown environment '{0}' (expected one of: int, stg, prod)")]
    UnknownEnvironment(String),
}

/// Failure of the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Argument parsing failed (includes `--help` and `--version` output).
    #[error(transparent)]
    Cli(#[from] clap::Error),
    /// The invocation was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The report could not be encoded.
    #[error("failed to encode report: {0}")]
    Output(#[from] serde_json::Error),
    /// A cassette could not be loaded or written.
    #[error("cassette error: {0}")]
    Cassette(String),
}
