//! Live git adapter using `git` CLI commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ports::git::{GitRepo, LogEntry, PortError};

/// Log format for history queries: full hash, a tab, committer date.
const LOG_FORMAT: &str = "--format=%H%x09%ci";

/// Live git adapter that shells out to the `git` CLI inside one working copy.
pub struct LiveGitRepo {
    repo_path: PathBuf,
}

impl LiveGitRepo {
    /// Creates an adapter that runs every command in `repo_path`.
    #[must_use]
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self { repo_path: repo_path.into() }
    }

    /// Returns the working copy this adapter operates on.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn run(&self, args: &[&str]) -> Result<String, PortError> {
        tracing::trace!(?args, repo = %self.repo_path.display(), "git");
        let output = Command::new("git").args(args).current_dir(&self.repo_path).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn last_commit_field(&self, path: &Path, format: &str) -> Result<Option<String>, PortError> {
        let path = path_arg(path);
        let stdout = self.run(&["log", "-1", format, "--", &path])?;
        let value = stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}

/// Git pathspecs always use forward slashes.
fn path_arg(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parses `<hash>\t<date>` lines produced with [`LOG_FORMAT`].
fn parse_log(stdout: &str) -> Result<Vec<LogEntry>, PortError> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (id, date) = line
                .split_once('\t')
                .ok_or_else(|| format!("unexpected git log line: {line:?}"))?;
            Ok(LogEntry { id: id.trim().to_string(), date: date.trim().to_string() })
        })
        .collect()
}

impl GitRepo for LiveGitRepo {
    fn fetch(&self, remote: &str) -> Result<(), PortError> {
        self.run(&["fetch", remote]).map(drop)
    }

    fn checkout(&self, branch: &str) -> Result<(), PortError> {
        self.run(&["checkout", branch]).map(drop)
    }

    fn reset_hard(&self, target: &str) -> Result<(), PortError> {
        self.run(&["reset", "--hard", target]).map(drop)
    }

    fn last_commit_date(&self, path: &Path) -> Result<Option<String>, PortError> {
        self.last_commit_field(path, "--format=%ci")
    }

    fn last_commit_id(&self, path: &Path) -> Result<Option<String>, PortError> {
        self.last_commit_field(path, "--format=%H")
    }

    fn commits_since(
        &self,
        path: &Path,
        since: DateTime<Utc>,
    ) -> Result<Vec<LogEntry>, PortError> {
        let since = format!("--since={}", since.to_rfc3339_opts(SecondsFormat::Secs, true));
        let path = path_arg(path);
        let stdout = self.run(&["log", &since, LOG_FORMAT, "--", &path])?;
        parse_log(&stdout)
    }

    fn show_file(&self, rev: &str, path: &Path) -> Result<String, PortError> {
        // `./` makes git resolve the path from the working directory, like `-- path`.
        self.run(&["show", &format!("{rev}:./{}", path_arg(path))])
    }
}
