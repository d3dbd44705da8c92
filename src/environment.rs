//! Deployment environments and the branch each one tracks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A deployment stage. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Integration, built from the main line.
    #[serde(rename = "int")]
    Integration,
    /// Staging release branch.
    #[serde(rename = "stg")]
    Staging,
    /// Production release branch.
    #[serde(rename = "prod")]
    Production,
}

impl Environment {
    /// Every environment, in report order.
    pub const ALL: [Self; 3] = [Self::Integration, Self::Staging, Self::Production];

    /// The branch this environment is deployed from.
    #[must_use]
    pub const fn branch(self) -> &'static str {
        match self {
            Self::Integration => "main",
            Self::Staging => "release/hcp/public/stg",
            Self::Production => "release/hcp/public/prod",
        }
    }

    /// Short name used as the report key and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Integration => "int",
            Self::Staging => "stg",
            Self::Production => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Environment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integration" => Ok(Self::Integration),
            "stg" | "staging" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ValidationError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Resolves a filter list into the environments to process, in report order.
///
/// An empty filter selects everything. Duplicates collapse.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownEnvironment`] for the first name that
/// is not an environment.
pub fn select(filter: &[String]) -> Result<Vec<Environment>, ValidationError> {
    if filter.iter().all(|name| name.trim().is_empty()) {
        return Ok(Environment::ALL.to_vec());
    }
    let mut selected = filter
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse())
        .collect::<Result<Vec<Environment>, _>>()?;
    selected.sort();
    selected.dedup();
    Ok(selected)
}
