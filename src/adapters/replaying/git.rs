//! Replaying adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::{GitRepo, LogEntry, PortError};

/// Replays recorded git operations from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn fetch(&self, _remote: &str) -> Result<(), PortError> {
        replay_result(&self.replayer, "git", "fetch")
    }

    fn checkout(&self, _branch: &str) -> Result<(), PortError> {
        replay_result(&self.replayer, "git", "checkout")
    }

    fn reset_hard(&self, _target: &str) -> Result<(), PortError> {
        replay_result(&self.replayer, "git", "reset_hard")
    }

    fn last_commit_date(&self, _path: &Path) -> Result<Option<String>, PortError> {
        replay_result(&self.replayer, "git", "last_commit_date")
    }

    fn last_commit_id(&self, _path: &Path) -> Result<Option<String>, PortError> {
        replay_result(&self.replayer, "git", "last_commit_id")
    }

    fn commits_since(
        &self,
        _path: &Path,
        _since: DateTime<Utc>,
    ) -> Result<Vec<LogEntry>, PortError> {
        replay_result(&self.replayer, "git", "commits_since")
    }

    fn show_file(&self, _rev: &str, _path: &Path) -> Result<String, PortError> {
        replay_result(&self.replayer, "git", "show_file")
    }
}
