//! Frontend build configuration assembled from the environment.

use std::path::PathBuf;

use serde::Serialize;
use url::Url;

use super::constants::{
    ENV_API_URL, ENV_PUBLIC_API_URL, ENV_REMOTE_PATTERNS, OPTIMIZE_FONTS, REACT_STRICT_MODE,
    SWC_MINIFY,
};
use super::env_file::{default_parent_env_path, EnvironmentMap};
use crate::domain::{parse_remote_patterns, RemotePattern};
use crate::errors::AppResult;

/// Settings object handed to the frontend build tooling.
///
/// Field names serialize to the shape the framework expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkConfig {
    pub react_strict_mode: bool,
    pub swc_minify: bool,
    pub images: ImagesConfig,
    pub optimize_fonts: bool,
    pub env: PublicEnv,
}

/// Image optimization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_patterns: Option<Vec<RemotePattern>>,
}

impl ImagesConfig {
    /// First pattern covering `url`, if any.
    pub fn matching_pattern(&self, url: &Url) -> Option<&RemotePattern> {
        self.remote_patterns
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|pattern| pattern.matches(url))
    }

    /// Whether images may be loaded from `url`. Nothing is allowed when no
    /// patterns are configured.
    pub fn allows(&self, url: &Url) -> bool {
        self.matching_pattern(url).is_some()
    }
}

/// Variables injected into the built bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicEnv {
    #[serde(rename = "NEXT_PUBLIC_API_URL")]
    pub public_api_url: String,
    #[serde(rename = "NEXT_PUBLIC_REMOTE_PATTERNS")]
    pub remote_patterns: String,
    #[serde(rename = "API_URL")]
    pub api_url: String,
}

impl PublicEnv {
    /// Entries keyed by their variable names, in output order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (ENV_PUBLIC_API_URL, self.public_api_url.as_str()),
            (ENV_REMOTE_PATTERNS, self.remote_patterns.as_str()),
            (ENV_API_URL, self.api_url.as_str()),
        ]
    }
}

/// How [`FrameworkConfig::load`] builds its environment.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Env file to merge; defaults to `../.env` from the working directory
    pub env_file: Option<PathBuf>,
    /// Do not read any env file
    pub skip_env_file: bool,
    /// Seed the environment from the current process
    pub inherit_process_env: bool,
    /// Write the merged environment back into the process
    pub export_to_process: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env_file: None,
            skip_env_file: false,
            inherit_process_env: true,
            export_to_process: false,
        }
    }
}

impl FrameworkConfig {
    /// Resolve the environment and assemble the configuration.
    ///
    /// Fails if the env file exists but cannot be read, or if a remote
    /// pattern looks like a URL but does not parse.
    pub fn load(options: &LoadOptions) -> AppResult<Self> {
        let mut env = if options.inherit_process_env {
            EnvironmentMap::from_process()
        } else {
            EnvironmentMap::new()
        };

        if !options.skip_env_file {
            let path = match &options.env_file {
                Some(path) => path.clone(),
                None => default_parent_env_path()?,
            };
            let outcome = env.merge_env_file(&path)?;
            tracing::debug!(
                path = %path.display(),
                found = outcome.found,
                applied = outcome.applied,
                "Env file processed"
            );
        }

        if options.export_to_process {
            env.export_to_process();
        }

        Self::from_env(&env)
    }

    /// Assemble the configuration from an already resolved environment.
    pub fn from_env(env: &EnvironmentMap) -> AppResult<Self> {
        let remote_patterns = parse_remote_patterns(env.get(ENV_REMOTE_PATTERNS))?;
        let public_api_url = env.get_or_default(ENV_PUBLIC_API_URL);

        Ok(Self {
            react_strict_mode: REACT_STRICT_MODE,
            swc_minify: SWC_MINIFY,
            images: ImagesConfig { remote_patterns },
            optimize_fonts: OPTIMIZE_FONTS,
            env: PublicEnv {
                api_url: public_api_url.clone(),
                public_api_url,
                remote_patterns: env.get_or_default(ENV_REMOTE_PATTERNS),
            },
        })
    }
}
