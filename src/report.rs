//! The JSON report printed to stdout.
//!
//! Schema version 1: one key per selected environment (`int`, `stg`,
//! `prod`, in that order), each an array of
//! `{"digest": "<value>", "commit_date": "YYYY-MM-DD HH:MM:SS +0000"}`
//! with the tip first. An environment whose branch failed maps to `[]`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::environment::Environment;
use crate::revision::RevisionRecord;

/// Version of the report layout described in the module docs.
pub const SCHEMA_VERSION: u32 = 1;

/// Records per environment, keyed in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report(BTreeMap<Environment, Vec<RevisionRecord>>);

impl Report {
    /// Sets the records for `environment`.
    pub fn insert(&mut self, environment: Environment, records: Vec<RevisionRecord>) {
        self.0.insert(environment, records);
    }

    /// Records for `environment`, if it was selected.
    #[must_use]
    pub fn get(&self, environment: Environment) -> Option<&Vec<RevisionRecord>> {
        self.0.get(&environment)
    }

    /// Number of environments in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no environment was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the report as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns the encoder error; with string-only content this does not happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
