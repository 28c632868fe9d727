//! Application configuration module
//!
//! Handles the shared env file, environment variables and the assembled
//! frontend build settings.

mod constants;
mod env_file;
mod settings;

pub use constants::*;
pub use env_file::{
    default_parent_env_path, merge_into_process, parent_env_path, EnvironmentMap, MergeOutcome,
};
pub use settings::{FrameworkConfig, ImagesConfig, LoadOptions, PublicEnv};
