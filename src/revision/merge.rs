//! Combining the tip with the historical window.

use super::tip::TipRevision;
use super::HistoricalCommitRecord;

/// A merged entry whose timestamp has not been normalized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    /// Extracted revision value.
    pub revision_value: String,
    /// Raw committer date.
    pub commit_timestamp: String,
}

/// Puts the tip first and drops the historical commit that produced it.
pub struct DeduplicatingMerger;

impl DeduplicatingMerger {
    /// Merges `tip` with `history`.
    ///
    /// The tip is always element 0. Historical records follow in scanner
    /// order, minus any whose commit id equals `tip_commit_id`. When the tip's
    /// id is unknown nothing is dropped.
    #[must_use]
    pub fn merge(
        tip: TipRevision,
        tip_commit_id: Option<&str>,
        history: Vec<HistoricalCommitRecord>,
    ) -> Vec<MergedEntry> {
        if tip_commit_id.is_none() && !history.is_empty() {
            tracing::warn!(
                records = history.len(),
                "tip commit id unknown; historical records kept without de-duplication"
            );
        }

        let mut merged = Vec::with_capacity(history.len() + 1);
        merged.push(MergedEntry {
            revision_value: tip.revision_value,
            commit_timestamp: tip.commit_timestamp,
        });
        merged.extend(
            history
                .into_iter()
                .filter(|record| tip_commit_id != Some(record.commit_id.as_str()))
                .map(|record| MergedEntry {
                    revision_value: record.revision_value,
                    commit_timestamp: record.commit_timestamp,
                }),
        );
        merged
    }
}
