//! Recording adapter for the `GitRepo` port.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::{record_result, SharedRecorder};
use crate::ports::git::{GitRepo, LogEntry, PortError};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: SharedRecorder,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl GitRepo for RecordingGitRepo {
    fn fetch(&self, remote: &str) -> Result<(), PortError> {
        let result = self.inner.fetch(remote);
        record_result(&self.recorder, "git", "fetch", &json!({ "remote": remote }), &result);
        result
    }

    fn checkout(&self, branch: &str) -> Result<(), PortError> {
        let result = self.inner.checkout(branch);
        record_result(&self.recorder, "git", "checkout", &json!({ "branch": branch }), &result);
        result
    }

    fn reset_hard(&self, target: &str) -> Result<(), PortError> {
        let result = self.inner.reset_hard(target);
        record_result(&self.recorder, "git", "reset_hard", &json!({ "target": target }), &result);
        result
    }

    fn last_commit_date(&self, path: &Path) -> Result<Option<String>, PortError> {
        let result = self.inner.last_commit_date(path);
        let input = json!({ "path": path.display().to_string() });
        record_result(&self.recorder, "git", "last_commit_date", &input, &result);
        result
    }

    fn last_commit_id(&self, path: &Path) -> Result<Option<String>, PortError> {
        let result = self.inner.last_commit_id(path);
        let input = json!({ "path": path.display().to_string() });
        record_result(&self.recorder, "git", "last_commit_id", &input, &result);
        result
    }

    fn commits_since(
        &self,
        path: &Path,
        since: DateTime<Utc>,
    ) -> Result<Vec<LogEntry>, PortError> {
        let result = self.inner.commits_since(path, since);
        let input = json!({ "path": path.display().to_string(), "since": since });
        record_result(&self.recorder, "git", "commits_since", &input, &result);
        result
    }

    fn show_file(&self, rev: &str, path: &Path) -> Result<String, PortError> {
        let result = self.inner.show_file(rev, path);
        let input = json!({ "rev": rev, "path": path.display().to_string() });
        record_result(&self.recorder, "git", "show_file", &input, &result);
        result
    }
}
