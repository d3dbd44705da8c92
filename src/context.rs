//! Service context bundling the port trait objects for one run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveGitRepo};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingGitRepo, SharedRecorder,
};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingGitRepo};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;

/// Bundles all port trait objects into a single context.
///
/// The live and recording constructors take the working copy explicitly;
/// nothing depends on the process working directory.
pub struct ServiceContext {
    /// Clock for the history window.
    pub clock: Box<dyn Clock>,
    /// Working-copy file reads.
    pub fs: Box<dyn FileSystem>,
    /// Git operations on the working copy.
    pub git: Box<dyn GitRepo>,
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a live context operating on `working_copy`.
    #[must_use]
    pub fn live(working_copy: &Path) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem::new(working_copy)),
            git: Box::new(LiveGitRepo::new(working_copy)),
            recorder: None,
        }
    }

    /// Creates a live context that also records every port call.
    ///
    /// The cassette is written to `cassette` by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(working_copy: &Path, cassette: &Path) -> Self {
        let name = cassette
            .file_stem()
            .map_or_else(|| "repo-rev-checker".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder: SharedRecorder = Arc::new(Mutex::new(CassetteRecorder::new(
            cassette,
            name,
            head_commit(working_copy),
        )));
        let live = Self::live(working_copy);
        Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&recorder))),
            fs: Box::new(RecordingFileSystem::new(live.fs, Arc::clone(&recorder))),
            git: Box::new(RecordingGitRepo::new(live.git, Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a context that serves every port from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(cassette: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(cassette)?;
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette))),
            recorder: None,
        })
    }

    /// Releases the ports and writes the cassette if this context records.
    ///
    /// Returns the cassette path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Self { clock, fs, git, recorder } = self;
        drop((clock, fs, git));
        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "cassette recorder still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("cassette recorder lock poisoned: {e}"))?;
        recorder.finish().map(Some).map_err(|e| format!("failed to write cassette: {e}"))
    }
}

/// HEAD of the working copy, or `unknown` if it cannot be read.
fn head_commit(working_copy: &Path) -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(working_copy)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        tracing::warn!(path = %working_copy.display(), "could not read HEAD; cassette commit is 'unknown'");
        "unknown".to_string()
    })
}
