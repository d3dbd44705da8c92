//! Bringing the working copy onto a branch.

use std::fmt;

use crate::error::{SyncError, SyncStep};
use crate::ports::git::GitRepo;

/// How a branch is brought up to date before it is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Fetch the remote, check out the branch, hard-reset it to the remote tip.
    #[default]
    FastForwardToRemote,
    /// Check out the branch as the working copy already has it.
    AsIs,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FastForwardToRemote => "fast-forward-to-remote",
            Self::AsIs => "as-is",
        })
    }
}

/// Leaves the working copy behind `git` checked out on a branch.
pub struct BranchSynchronizer<'a> {
    git: &'a dyn GitRepo,
    remote: &'a str,
    mode: SyncMode,
}

impl<'a> BranchSynchronizer<'a> {
    /// Creates a synchronizer that resets against `remote` when `mode` asks for it.
    #[must_use]
    pub fn new(git: &'a dyn GitRepo, remote: &'a str, mode: SyncMode) -> Self {
        Self { git, remote, mode }
    }

    /// Checks out `branch`, first fetching and afterwards hard-resetting it to
    /// `<remote>/<branch>` in fast-forward mode.
    ///
    /// No step is retried; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] naming the branch and the step that failed.
    pub fn sync(&self, branch: &str) -> Result<(), SyncError> {
        let fail = |step| move |source| SyncError { branch: branch.to_string(), step, source };

        if self.mode == SyncMode::FastForwardToRemote {
            self.git.fetch(self.remote).map_err(fail(SyncStep::Fetch))?;
        }
        self.git.checkout(branch).map_err(fail(SyncStep::Checkout))?;
        if self.mode == SyncMode::FastForwardToRemote {
            let target = format!("{}/{branch}", self.remote);
            self.git.reset_hard(&target).map_err(fail(SyncStep::Reset))?;
        }
        tracing::debug!(branch, mode = %self.mode, "branch synchronized");
        Ok(())
    }
}
