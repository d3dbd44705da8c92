//! Driving the pipeline over every selected environment.

use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;

use super::history::HistoricalWindowScanner;
use super::merge::{DeduplicatingMerger, MergedEntry};
use super::sync::{BranchSynchronizer, SyncMode};
use super::timestamp::normalize_utc;
use super::tip::TipRevisionExtractor;
use super::{HistoricalCommitRecord, RevisionRecord};
use crate::environment::Environment;
use crate::error::{BranchError, TimestampParseError};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::report::Report;

/// Where a branch is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// Not started.
    Pending,
    /// Fetch / checkout / reset in progress.
    Synchronizing,
    /// Reading the tip value and commit.
    ExtractingTip,
    /// Walking the history window.
    ScanningHistory,
    /// Combining tip and history.
    Merging,
    /// Converting timestamps to UTC.
    Normalizing,
    /// Records produced.
    Done,
    /// Aborted; the environment gets no records.
    Failed,
}

impl fmt::Display for BranchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Synchronizing => "synchronizing",
            Self::ExtractingTip => "extracting-tip",
            Self::ScanningHistory => "scanning-history",
            Self::Merging => "merging",
            Self::Normalizing => "normalizing",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

/// Outcome of one branch.
#[derive(Debug)]
pub struct BranchOutcome {
    /// Environment the branch feeds.
    pub environment: Environment,
    /// `Done` or `Failed`.
    pub state: BranchState,
    /// Records on success, empty on failure.
    pub records: Vec<RevisionRecord>,
}

/// Tracks the state of a single branch run and logs transitions.
struct BranchRun {
    environment: Environment,
    state: BranchState,
}

impl BranchRun {
    fn new(environment: Environment) -> Self {
        Self { environment, state: BranchState::Pending }
    }

    fn enter(&mut self, next: BranchState) {
        tracing::debug!(
            env = %self.environment,
            branch = self.environment.branch(),
            from = %self.state,
            to = %next,
            "branch state"
        );
        self.state = next;
    }
}

/// Runs the revision pipeline branch by branch over one working copy.
///
/// Branches are processed strictly one after another: every step runs
/// against the same checkout, which the synchronizer mutates. Running
/// branches in parallel would need one isolated working copy per branch.
pub struct ResultAggregator<'a> {
    git: &'a dyn GitRepo,
    fs: &'a dyn FileSystem,
    clock: &'a dyn Clock,
    remote: &'a str,
    path: &'a Path,
    key: &'a str,
    mode: SyncMode,
    days: Option<NonZeroU32>,
}

impl<'a> ResultAggregator<'a> {
    /// Creates an aggregator over the given ports.
    #[must_use]
    pub fn new(
        git: &'a dyn GitRepo,
        fs: &'a dyn FileSystem,
        clock: &'a dyn Clock,
        path: &'a Path,
        key: &'a str,
    ) -> Self {
        Self {
            git,
            fs,
            clock,
            remote: crate::config::DEFAULT_REMOTE,
            path,
            key,
            mode: SyncMode::default(),
            days: None,
        }
    }

    /// Sets the remote and synchronization mode.
    #[must_use]
    pub fn with_sync(mut self, remote: &'a str, mode: SyncMode) -> Self {
        self.remote = remote;
        self.mode = mode;
        self
    }

    /// Enables the history window.
    #[must_use]
    pub fn with_days(mut self, days: Option<NonZeroU32>) -> Self {
        self.days = days;
        self
    }

    /// Processes every environment in `environments` and collects the report.
    ///
    /// A failing branch is logged and reported with no records; it never
    /// stops the remaining branches.
    #[must_use]
    pub fn run(&self, environments: &[Environment]) -> Report {
        let mut report = Report::default();
        for outcome in environments.iter().map(|&env| self.process(env)) {
            report.insert(outcome.environment, outcome.records);
        }
        report
    }

    /// Runs the pipeline for one environment.
    #[must_use]
    pub fn process(&self, environment: Environment) -> BranchOutcome {
        let mut run = BranchRun::new(environment);
        match self.process_branch(&mut run) {
            Ok(records) => {
                run.enter(BranchState::Done);
                tracing::info!(env = %environment, records = records.len(), "branch done");
                BranchOutcome { environment, state: run.state, records }
            }
            Err(err) => {
                tracing::error!(
                    env = %environment,
                    branch = environment.branch(),
                    file = %self.path.display(),
                    during = %run.state,
                    "Error processing branch '{}': {err}",
                    environment.branch()
                );
                run.enter(BranchState::Failed);
                BranchOutcome { environment, state: run.state, records: Vec::new() }
            }
        }
    }

    fn process_branch(&self, run: &mut BranchRun) -> Result<Vec<RevisionRecord>, BranchError> {
        let branch = run.environment.branch();

        run.enter(BranchState::Synchronizing);
        BranchSynchronizer::new(self.git, self.remote, self.mode).sync(branch)?;

        run.enter(BranchState::ExtractingTip);
        let extractor = TipRevisionExtractor::new(self.fs, self.git, self.path, self.key);
        let tip = extractor.extract()?;

        let (history, tip_id) = match self.days {
            Some(days) => {
                run.enter(BranchState::ScanningHistory);
                self.scan_window(&extractor, branch, days)
            }
            None => (Vec::new(), None),
        };

        run.enter(BranchState::Merging);
        let merged = DeduplicatingMerger::merge(tip, tip_id.as_deref(), history);

        run.enter(BranchState::Normalizing);
        normalize(branch, merged).map_err(BranchError::from)
    }

    /// Scans the window and looks up the tip's commit id for de-duplication.
    ///
    /// Neither failure is fatal: a failed log query reports the tip alone, an
    /// unknown tip id disables de-duplication.
    fn scan_window(
        &self,
        extractor: &TipRevisionExtractor<'_>,
        branch: &str,
        days: NonZeroU32,
    ) -> (Vec<HistoricalCommitRecord>, Option<String>) {
        let history =
            match HistoricalWindowScanner::new(self.git, self.clock, self.path, self.key).scan(days) {
                Ok(scan) => scan.records,
                Err(err) => {
                    tracing::warn!(branch, %err, "history window unavailable; reporting tip only");
                    Vec::new()
                }
            };
        let tip_id = extractor.commit_id().unwrap_or_else(|err| {
            tracing::warn!(branch, %err, "could not determine tip commit id");
            None
        });
        (history, tip_id)
    }
}

/// Normalizes every entry's timestamp.
///
/// The tip (element 0) must normalize or the branch fails. A historical
/// entry with a malformed timestamp is logged and dropped.
fn normalize(
    branch: &str,
    merged: Vec<MergedEntry>,
) -> Result<Vec<RevisionRecord>, TimestampParseError> {
    let mut entries = merged.into_iter();
    let mut records = Vec::with_capacity(entries.len());
    if let Some(tip) = entries.next() {
        records.push(RevisionRecord::new(tip.revision_value, normalize_utc(&tip.commit_timestamp)?));
    }
    for entry in entries {
        match normalize_utc(&entry.commit_timestamp) {
            Ok(timestamp) => records.push(RevisionRecord::new(entry.revision_value, timestamp)),
            Err(err) => tracing::warn!(branch, %err, "dropping historical record"),
        }
    }
    Ok(records)
}
