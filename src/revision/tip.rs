//! Reading the current revision value and the commit that set it.

use std::path::Path;

use super::extract_revision;
use crate::error::{BranchError, ExtractionError, HistoryError};
use crate::ports::filesystem::FileSystem;
use crate::ports::git::{GitRepo, PortError};

/// The tip of a branch as seen through the tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRevision {
    /// Value currently in the working copy.
    pub revision_value: String,
    /// Raw committer date of the newest commit touching the file.
    pub commit_timestamp: String,
}

/// Extracts the tip value from whatever branch the working copy is on.
pub struct TipRevisionExtractor<'a> {
    fs: &'a dyn FileSystem,
    git: &'a dyn GitRepo,
    path: &'a Path,
    key: &'a str,
}

impl<'a> TipRevisionExtractor<'a> {
    /// Creates an extractor for `key` in the file at `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, git: &'a dyn GitRepo, path: &'a Path, key: &'a str) -> Self {
        Self { fs, git, path, key }
    }

    /// Reads the working-copy file and finds the commit that last touched it.
    ///
    /// # Errors
    ///
    /// [`ExtractionError`] if the file is unreadable or lacks the key;
    /// [`HistoryError`] if no commit touched the file or the log query failed.
    pub fn extract(&self) -> Result<TipRevision, BranchError> {
        let content = self.fs.read_to_string(self.path).map_err(|source| {
            ExtractionError::Read { path: self.path.to_path_buf(), source }
        })?;
        let revision_value = extract_revision(&content, self.key, self.path)?;

        let commit_timestamp = self
            .git
            .last_commit_date(self.path)
            .map_err(|source| HistoryError::Query { path: self.path.to_path_buf(), source })?
            .ok_or_else(|| HistoryError::NoCommits { path: self.path.to_path_buf() })?;

        Ok(TipRevision { revision_value, commit_timestamp })
    }

    /// Hash of the commit that last touched the file.
    ///
    /// # Errors
    ///
    /// Returns the port error if the lookup fails.
    pub fn commit_id(&self) -> Result<Option<String>, PortError> {
        self.git.last_commit_id(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::testing::{FakeBranch, FakeGit};

    const PATH: &str = "hcp/Revision.mk";
    const KEY: &str = "ARO_HCP_REPO_REVISION";

    fn on_main(branch: FakeBranch) -> FakeGit {
        let git = FakeGit::default().with_branch("main", branch);
        git.checkout("main").unwrap();
        git
    }

    #[test]
    fn extracts_value_and_raw_commit_date() {
        let git = on_main(
            FakeBranch::default()
                .worktree("ARO_HCP_REPO_REVISION=\"526f70d3d81f\"\n")
                .tip("c1", "2025-09-24 02:55:10 -0700"),
        );
        let tip = TipRevisionExtractor::new(&git, &git, Path::new(PATH), KEY).extract().unwrap();
        assert_eq!(tip.revision_value, "526f70d3d81f");
        assert_eq!(tip.commit_timestamp, "2025-09-24 02:55:10 -0700");
    }

    #[test]
    fn unreadable_file_is_extraction_error() {
        let git = on_main(FakeBranch::default().tip("c1", "2025-09-24 02:55:10 -0700"));
        let err = TipRevisionExtractor::new(&git, &git, Path::new(PATH), KEY).extract().unwrap_err();
        assert!(matches!(err, BranchError::Extraction(ExtractionError::Read { .. })));
    }

    #[test]
    fn missing_key_is_extraction_error() {
        let git = on_main(
            FakeBranch::default().worktree("OTHER = 1\n").tip("c1", "2025-09-24 02:55:10 -0700"),
        );
        let err = TipRevisionExtractor::new(&git, &git, Path::new(PATH), KEY).extract().unwrap_err();
        assert!(matches!(err, BranchError::Extraction(ExtractionError::KeyNotFound { .. })));
        assert!(err.to_string().contains(PATH));
    }

    #[test]
    fn file_without_commits_is_history_error() {
        let git = on_main(FakeBranch::default().worktree("ARO_HCP_REPO_REVISION = abc\n"));
        let err = TipRevisionExtractor::new(&git, &git, Path::new(PATH), KEY).extract().unwrap_err();
        assert!(matches!(err, BranchError::History(HistoryError::NoCommits { .. })));
    }
}
