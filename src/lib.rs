//! web-config - Build-time configuration for the web frontend
//!
//! Resolves the frontend's build settings from the shared `.env` one
//! directory up and the process environment, and hands them to the build
//! tooling as JSON.
//!
//! # Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Env file merging, constants and the assembled settings
//! - **domain**: Remote image pattern parsing and matching
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the configuration consumed by the build
//! cargo run -- show --pretty
//!
//! # Print the public env block
//! cargo run -- env
//!
//! # Check an image URL against the allow list
//! cargo run -- check https://cdn.example.com/logo.png
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;

// Re-export commonly used types at crate root
pub use config::{EnvironmentMap, FrameworkConfig, LoadOptions};
pub use domain::{parse_remote_patterns, Protocol, RemotePattern};
pub use errors::{AppError, AppResult};
