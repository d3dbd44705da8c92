//! Live filesystem adapter using `std::fs`.

use std::path::{Path, PathBuf};

use crate::ports::filesystem::FileSystem;
use crate::ports::git::PortError;

/// Live filesystem adapter rooted at the working copy.
pub struct LiveFileSystem {
    root: PathBuf,
}

impl LiveFileSystem {
    /// Creates an adapter that resolves paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }
}
