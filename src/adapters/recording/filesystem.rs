//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde_json::json;

use super::{record_result, SharedRecorder};
use crate::ports::filesystem::FileSystem;
use crate::ports::git::PortError;

/// Records file reads while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        let input = json!({ "path": path.display().to_string() });
        record_result(&self.recorder, "fs", "read_to_string", &input, &result);
        result
    }
}
