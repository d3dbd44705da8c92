//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod git;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::PortError;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;

/// Replays a `Result<T, _>` recorded with `recording::record_result`.
///
/// `{"err": msg}` becomes `Err(msg)`; `{"ok": v}` is deserialized into `T`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<T, PortError> {
    let output = replayer
        .lock()
        .map_err(|_| format!("{port}::{method}: replayer lock poisoned"))?
        .next_output(port, method)?;
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value)
        .map_err(|e| format!("{port}::{method}: failed to deserialize: {e}").into())
}
