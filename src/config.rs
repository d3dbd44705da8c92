//! Run configuration assembled from CLI flags and environment overrides.
//!
//! `main` loads an optional `.env` file first, so the overrides below can
//! live there as well.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::environment::{self, Environment};
use crate::error::ValidationError;
use crate::revision::sync::SyncMode;

/// Remote that branches are reset against.
pub const DEFAULT_REMOTE: &str = "origin";
/// File holding the pinned revision, relative to the working copy.
pub const DEFAULT_REVISION_FILE: &str = "hcp/Revision.mk";
/// Key whose value is reported.
pub const DEFAULT_KEY: &str = "ARO_HCP_REPO_REVISION";

/// Overrides [`DEFAULT_REMOTE`].
pub const REMOTE_VAR: &str = "REPO_REV_REMOTE";
/// Overrides [`DEFAULT_REVISION_FILE`].
pub const FILE_VAR: &str = "REPO_REV_FILE";
/// Overrides [`DEFAULT_KEY`].
pub const KEY_VAR: &str = "REPO_REV_KEY";
/// When set, every port call is recorded to this cassette file.
pub const RECORD_VAR: &str = "REPO_REV_RECORD";

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute path of the working copy.
    pub directory: PathBuf,
    /// Remote name.
    pub remote: String,
    /// Tracked file, relative to `directory`.
    pub revision_file: PathBuf,
    /// Key to extract.
    pub key: String,
    /// How branches are synchronized.
    pub sync_mode: SyncMode,
    /// Environments to report, in report order.
    pub environments: Vec<Environment>,
    /// History window; `None` reports the tip only.
    pub days: Option<NonZeroU32>,
}

impl Settings {
    /// Builds settings from parsed flags and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a bad directory or environment name.
    pub fn from_cli(cli: &Cli) -> Result<Self, ValidationError> {
        let cwd = std::env::current_dir().map_err(ValidationError::CurrentDir)?;
        Self::resolve(cli, &cwd, |name| std::env::var(name).ok())
    }

    /// Builds settings with an explicit working directory and variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a bad directory or environment name.
    pub fn resolve(
        cli: &Cli,
        cwd: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ValidationError> {
        let environments = environment::select(&cli.environments)?;
        let directory = validate_directory(&cwd.join(&cli.directory))?;
        let lookup = |name: &str, default: &str| {
            var(name).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            directory,
            remote: lookup(REMOTE_VAR, DEFAULT_REMOTE),
            revision_file: PathBuf::from(lookup(FILE_VAR, DEFAULT_REVISION_FILE)),
            key: lookup(KEY_VAR, DEFAULT_KEY),
            sync_mode: if cli.quick { SyncMode::AsIs } else { SyncMode::FastForwardToRemote },
            environments,
            days: NonZeroU32::new(cli.days),
        })
    }
}

fn validate_directory(path: &Path) -> Result<PathBuf, ValidationError> {
    if !path.exists() {
        return Err(ValidationError::MissingDirectory(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.to_path_buf()));
    }
    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
