//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `show` - Print the assembled configuration
//! - `env` - Print the public env block
//! - `check` - Test an image URL against the remote patterns

pub mod args;

pub use args::{Cli, Commands};
