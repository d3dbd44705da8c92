//! In-memory port fakes for pipeline tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::{GitRepo, LogEntry, PortError};

/// Canned state of one branch.
#[derive(Debug, Clone, Default)]
pub struct FakeBranch {
    pub worktree: Option<String>,
    pub tip_id: Option<String>,
    pub tip_date: Option<String>,
    pub tip_id_fails: bool,
    pub history: Vec<LogEntry>,
    pub history_fails: bool,
    pub contents: HashMap<String, String>,
}

impl FakeBranch {
    pub fn worktree(mut self, content: &str) -> Self {
        self.worktree = Some(content.to_string());
        self
    }

    pub fn tip(mut self, id: &str, date: &str) -> Self {
        self.tip_id = Some(id.to_string());
        self.tip_date = Some(date.to_string());
        self
    }

    /// Adds a commit to the window (newest first) with the file content at that commit.
    pub fn commit(mut self, id: &str, date: &str, content: Option<&str>) -> Self {
        self.history.push(LogEntry { id: id.to_string(), date: date.to_string() });
        if let Some(content) = content {
            self.contents.insert(id.to_string(), content.to_string());
        }
        self
    }
}

/// A fake repository implementing both `GitRepo` and `FileSystem`.
#[derive(Default)]
pub struct FakeGit {
    pub branches: HashMap<String, FakeBranch>,
    pub fail_fetch: bool,
    pub fail_checkout: Vec<String>,
    pub fail_reset: Vec<String>,
    pub current: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn with_branch(mut self, name: &str, branch: FakeBranch) -> Self {
        self.branches.insert(name.to_string(), branch);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn current(&self) -> Result<FakeBranch, PortError> {
        let current = self.current.lock().unwrap().clone().ok_or("no branch checked out")?;
        self.branches.get(&current).cloned().ok_or_else(|| format!("unknown branch {current}").into())
    }
}

impl GitRepo for FakeGit {
    fn fetch(&self, remote: &str) -> Result<(), PortError> {
        self.log(format!("fetch {remote}"));
        if self.fail_fetch {
            return Err("could not read from remote repository".into());
        }
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<(), PortError> {
        self.log(format!("checkout {branch}"));
        if self.fail_checkout.iter().any(|b| b == branch) {
            return Err(format!("pathspec '{branch}' did not match").into());
        }
        *self.current.lock().unwrap() = Some(branch.to_string());
        Ok(())
    }

    fn reset_hard(&self, target: &str) -> Result<(), PortError> {
        self.log(format!("reset_hard {target}"));
        if self.fail_reset.iter().any(|t| target.ends_with(t.as_str())) {
            return Err(format!("unknown revision {target}").into());
        }
        Ok(())
    }

    fn last_commit_date(&self, _path: &Path) -> Result<Option<String>, PortError> {
        Ok(self.current()?.tip_date)
    }

    fn last_commit_id(&self, _path: &Path) -> Result<Option<String>, PortError> {
        let branch = self.current()?;
        if branch.tip_id_fails {
            return Err("rev lookup failed".into());
        }
        Ok(branch.tip_id)
    }

    fn commits_since(
        &self,
        _path: &Path,
        since: DateTime<Utc>,
    ) -> Result<Vec<LogEntry>, PortError> {
        self.log(format!("commits_since {}", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        let branch = self.current()?;
        if branch.history_fails {
            return Err("log failed".into());
        }
        Ok(branch.history)
    }

    fn show_file(&self, rev: &str, path: &Path) -> Result<String, PortError> {
        self.current()?
            .contents
            .get(rev)
            .cloned()
            .ok_or_else(|| format!("path '{}' does not exist in '{rev}'", path.display()).into())
    }
}

impl FileSystem for FakeGit {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.current()?
            .worktree
            .ok_or_else(|| format!("{}: No such file or directory", path.display()).into())
    }
}

/// A clock stuck at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(rfc3339: &str) -> Self {
        Self(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
