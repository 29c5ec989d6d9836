//! Data structures persisted on disk.

pub mod credential;
pub mod location;
