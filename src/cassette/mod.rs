//! Cassette format for recording and replaying port calls.

pub mod format;
pub mod recorder;
pub mod replayer;
