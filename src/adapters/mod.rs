//! Adapters implementing the port traits.
//!
//! `live` talks to git and the disk, `recording` wraps live adapters and
//! captures every call into a cassette, `replaying` serves a cassette back.

pub mod live;
pub mod recording;
pub mod replaying;
