//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `repo-rev-checker`.
#[derive(Debug, Parser)]
#[command(
    name = "repo-rev-checker",
    version,
    about = "Check repository revisions across release branches",
    long_about = "Brings main, release/hcp/public/stg and release/hcp/public/prod up to date \
                  in turn, extracts ARO_HCP_REPO_REVISION from hcp/Revision.mk on each, and \
                  prints the values with their UTC commit dates as JSON."
)]
pub struct Cli {
    /// Path to the working copy to inspect.
    pub directory: PathBuf,

    /// Check branches out as they are, without fetching or resetting to the remote.
    #[arg(long)]
    pub quick: bool,

    // Parsed by `environment::select` rather than a `ValueEnum`, so an unknown
    // name is a validation error (exit 1) instead of a clap usage error (exit 2).
    /// Environments to report (int, stg, prod). Comma separated or repeated; default all.
    #[arg(short = 'e', long = "env", value_name = "ENV", value_delimiter = ',')]
    pub environments: Vec<String>,

    /// Also report every value the file held within the last N days (0 = tip only).
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub days: u32,

    /// Log pipeline progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
