//! Helpers for building throwaway upstream/working-copy git pairs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::{Duration, Utc};
use tempfile::TempDir;

pub const REVISION_FILE: &str = "hcp/Revision.mk";
pub const STG: &str = "release/hcp/public/stg";
pub const PROD: &str = "release/hcp/public/prod";

/// Runs git in `dir` with a fixed identity and commit date.
pub fn git(dir: &Path, args: &[&str], date: Option<&str>) -> Output {
    let mut cmd = Command::new("git");
    cmd.args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "advice.detachedHead=false"])
        .args(args)
        .current_dir(dir);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let output = cmd.output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Git date `days` days before now, in UTC.
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).format("%Y-%m-%dT%H:%M:%S+0000").to_string()
}

/// An upstream repository and a clone of it that the checker inspects.
pub struct Fixture {
    _root: TempDir,
    pub upstream: PathBuf,
    pub work: PathBuf,
    pub scratch: PathBuf,
}

impl Fixture {
    /// Creates an empty upstream repository on `main`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let upstream = root.path().join("upstream");
        let work = root.path().join("work");
        let scratch = root.path().join("scratch");
        std::fs::create_dir_all(&upstream).unwrap();
        std::fs::create_dir_all(&scratch).unwrap();
        git(&upstream, &["init", "-q"], None);
        git(&upstream, &["symbolic-ref", "HEAD", "refs/heads/main"], None);
        Self { _root: root, upstream, work, scratch }
    }

    /// Writes the revision file on the upstream's current branch and commits it.
    pub fn commit_file(&self, content: &str, date: &str) {
        let path = self.upstream.join(REVISION_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        git(&self.upstream, &["add", REVISION_FILE], None);
        git(&self.upstream, &["commit", "-q", "-m", "bump revision"], Some(date));
    }

    /// Commits an unrelated file so HEAD moves without touching the revision file.
    pub fn commit_other(&self, date: &str) {
        std::fs::write(self.upstream.join("README.md"), date).unwrap();
        git(&self.upstream, &["add", "README.md"], None);
        git(&self.upstream, &["commit", "-q", "-m", "docs"], Some(date));
    }

    /// Switches the upstream to `branch`, creating it from the current commit if needed.
    pub fn switch(&self, branch: &str, create: bool) {
        if create {
            git(&self.upstream, &["checkout", "-q", "-b", branch], None);
        } else {
            git(&self.upstream, &["checkout", "-q", branch], None);
        }
    }

    /// Clones the upstream into the working copy.
    pub fn clone_work(&self) {
        let root = self.work.parent().unwrap();
        git(root, &["clone", "-q", self.upstream.to_str().unwrap(), "work"], None);
    }

    /// Runs the checker binary against the working copy.
    pub fn run(&self, extra: &[&str]) -> Output {
        self.run_with_env(extra, &[])
    }

    /// Runs the checker binary with extra environment variables.
    pub fn run_with_env(&self, extra: &[&str], vars: &[(&str, &str)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_repo-rev-checker");
        let mut cmd = Command::new(bin);
        cmd.arg(&self.work)
            .args(extra)
            .current_dir(&self.scratch)
            .env_remove("REPO_REV_RECORD")
            .env_remove("REPO_REV_REMOTE")
            .env_remove("REPO_REV_FILE")
            .env_remove("REPO_REV_KEY")
            .env_remove("REPO_REV_LOG");
        for (key, value) in vars {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to run repo-rev-checker")
    }
}

/// Parses the checker's stdout as JSON.
pub fn report(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Digests reported for `env`, in order.
pub fn digests(report: &serde_json::Value, env: &str) -> Vec<String> {
    report[env]
        .as_array()
        .unwrap_or_else(|| panic!("no array for {env}: {report}"))
        .iter()
        .map(|r| r["digest"].as_str().unwrap().to_string())
        .collect()
}
