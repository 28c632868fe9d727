//! Domain layer - Remote image source allow list
//!
//! Pure parsing and matching logic with no filesystem or process access.

pub mod remote_pattern;

pub use remote_pattern::{parse_remote_patterns, Protocol, RemotePattern};
