//! Check command - Tests an image URL against the remote patterns.

use std::io::{self, Write};

use url::Url;

use crate::cli::args::CheckArgs;
use crate::config::FrameworkConfig;
use crate::errors::{AppError, AppResult};

/// Execute the check command. Returns whether the URL is allowed.
pub fn execute(args: CheckArgs, config: &FrameworkConfig) -> AppResult<bool> {
    let url = Url::parse(args.url.trim()).map_err(|_| AppError::InvalidUrl(args.url.clone()))?;
    let mut stdout = io::stdout().lock();

    match config.images.matching_pattern(&url) {
        Some(pattern) => {
            tracing::debug!(url = %url, pattern = %pattern, "Remote image allowed");
            writeln!(stdout, "allowed: {} (matched {})", url, pattern)?;
            Ok(true)
        }
        None => {
            tracing::debug!(url = %url, "Remote image not allowed");
            writeln!(stdout, "denied: {}", url)?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvironmentMap, ENV_REMOTE_PATTERNS};

    fn config_with(patterns: &str) -> FrameworkConfig {
        let env: EnvironmentMap = [(ENV_REMOTE_PATTERNS, patterns)].into_iter().collect();
        FrameworkConfig::from_env(&env).unwrap()
    }

    #[test]
    fn test_allowed_url() {
        let config = config_with("https://cdn.example.com");
        let args = CheckArgs {
            url: "https://cdn.example.com/logo.png".to_string(),
        };
        assert!(execute(args, &config).unwrap());
    }

    #[test]
    fn test_denied_url() {
        let config = config_with("cdn.example.com");
        let args = CheckArgs {
            url: "https://cdn.example.com/logo.png".to_string(),
        };
        assert!(!execute(args, &config).unwrap());
    }

    #[test]
    fn test_invalid_url() {
        let config = config_with("cdn.example.com");
        let args = CheckArgs {
            url: "not a url".to_string(),
        };
        assert!(matches!(
            execute(args, &config).unwrap_err(),
            AppError::InvalidUrl(_)
        ));
    }
}
