//! Branch revision-history extraction.
//!
//! Per branch: [`sync::BranchSynchronizer`] → [`tip::TipRevisionExtractor`] →
//! [`history::HistoricalWindowScanner`] (only with a day window) →
//! [`merge::DeduplicatingMerger`] → [`timestamp::normalize_utc`], driven
//! serially by [`aggregate::ResultAggregator`].

pub mod aggregate;
pub mod history;
pub mod merge;
pub mod parse;
pub mod sync;
pub mod timestamp;
pub mod tip;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use serde::Serialize;

use crate::error::ExtractionError;

/// One reported revision: the pinned value and the UTC time of the commit
/// that set it.
///
/// Serialized as `{"digest": .., "commit_date": ..}` (report schema v1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionRecord {
    #[serde(rename = "digest")]
    revision_value: String,
    #[serde(rename = "commit_date")]
    commit_timestamp: String,
}

impl RevisionRecord {
    /// Builds a record from an extracted value and a normalized timestamp.
    #[must_use]
    pub fn new(revision_value: impl Into<String>, commit_timestamp: impl Into<String>) -> Self {
        Self { revision_value: revision_value.into(), commit_timestamp: commit_timestamp.into() }
    }

    /// The extracted revision value.
    #[must_use]
    pub fn revision_value(&self) -> &str {
        &self.revision_value
    }

    /// Commit time in `YYYY-MM-DD HH:MM:SS +0000`.
    #[must_use]
    pub fn commit_timestamp(&self) -> &str {
        &self.commit_timestamp
    }
}

/// A commit inside the history window together with the value it carried.
///
/// The timestamp is still in the committer's offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalCommitRecord {
    /// Commit hash.
    pub commit_id: String,
    /// Raw committer date.
    pub commit_timestamp: String,
    /// Value extracted from the file as of this commit.
    pub revision_value: String,
}

/// Extracts the value of `key` from `content`, read from `path`.
///
/// # Errors
///
/// Returns [`ExtractionError::KeyNotFound`] if no line assigns `key` and
/// [`ExtractionError::EmptyValue`] if the assigned value is empty.
pub fn extract_revision(content: &str, key: &str, path: &Path) -> Result<String, ExtractionError> {
    match parse::extract_value(content, key) {
        None => Err(ExtractionError::KeyNotFound { key: key.to_string(), path: path.to_path_buf() }),
        Some("") => {
            Err(ExtractionError::EmptyValue { key: key.to_string(), path: path.to_path_buf() })
        }
        Some(value) => Ok(value.to_string()),
    }
}
