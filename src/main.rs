//! Binary entrypoint for the `repo-rev-checker` CLI.

use std::process::ExitCode;

use repo_rev_checker::error::RunError;

fn main() -> ExitCode {
    // Overrides such as REPO_REV_REMOTE may come from a local .env file.
    let _ = dotenvy::dotenv();

    match repo_rev_checker::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
