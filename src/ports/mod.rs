//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the revision pipeline and an
//! external system (time, the working-copy filesystem, git).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod git;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::{GitRepo, LogEntry, PortError};
