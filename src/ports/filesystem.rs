//! Filesystem port for reading files out of the working copy.

use std::path::Path;

use super::git::PortError;

/// Reads files from the working copy.
///
/// Paths are relative to the working copy root the implementation was
/// constructed with.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;
}
