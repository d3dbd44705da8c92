//! Core library entry for the `repo-rev-checker` CLI.
//!
//! Reports, per deployment environment, the revision pinned in a tracked
//! file on that environment's branch and when it last changed.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod logging;
pub mod ports;
pub mod report;
pub mod revision;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RunError;
use crate::report::Report;
use crate::revision::aggregate::ResultAggregator;

/// Run the CLI with the provided arguments and print the report to stdout.
///
/// When `REPO_REV_RECORD` names a file, every port call is recorded there.
///
/// # Errors
///
/// Returns a [`RunError`] for bad arguments or a fatal setup failure.
/// Per-branch failures are logged and never surface here.
pub fn run<I, T>(args: I) -> Result<(), RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    logging::init(cli.verbose);
    let settings = Settings::from_cli(&cli)?;

    let ctx = match std::env::var_os(config::RECORD_VAR) {
        Some(path) if !path.is_empty() => {
            ServiceContext::recording(&settings.directory, &PathBuf::from(path))
        }
        _ => ServiceContext::live(&settings.directory),
    };

    let report = collect(&settings, &ctx);
    if let Some(path) = ctx.finish().map_err(RunError::Cassette)? {
        tracing::info!(path = %path.display(), "cassette written");
    }

    println!("{}", report.to_json()?);
    Ok(())
}

/// Runs the pipeline for `settings` against the ports in `ctx`.
#[must_use]
pub fn collect(settings: &Settings, ctx: &ServiceContext) -> Report {
    tracing::debug!(
        directory = %settings.directory.display(),
        mode = %settings.sync_mode,
        days = settings.days.map_or(0, std::num::NonZeroU32::get),
        schema = report::SCHEMA_VERSION,
        "collecting revisions"
    );
    ResultAggregator::new(
        ctx.git.as_ref(),
        ctx.fs.as_ref(),
        ctx.clock.as_ref(),
        &settings.revision_file,
        &settings.key,
    )
    .with_sync(&settings.remote, settings.sync_mode)
    .with_days(settings.days)
    .run(&settings.environments)
}
