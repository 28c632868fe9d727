//! Application-wide constants
//!
//! Centralized location for environment variable names and defaults.

// =============================================================================
// Environment File
// =============================================================================

/// Env file name looked up in the parent of the working directory
pub const ENV_FILE_NAME: &str = ".env";

/// Directory holding the shared env file, relative to the working directory
pub const PARENT_ENV_DIR: &str = "..";

/// Overrides the env file location for the CLI
pub const ENV_FILE_OVERRIDE_VAR: &str = "WEB_CONFIG_ENV_FILE";

// =============================================================================
// Environment Variables
// =============================================================================

/// Comma-separated remote image host patterns
pub const ENV_REMOTE_PATTERNS: &str = "NEXT_PUBLIC_REMOTE_PATTERNS";

/// Public API base URL exposed to the browser bundle
pub const ENV_PUBLIC_API_URL: &str = "NEXT_PUBLIC_API_URL";

/// Server-side alias of the public API base URL
pub const ENV_API_URL: &str = "API_URL";

/// Default for passthrough settings that are unset
pub const DEFAULT_PASSTHROUGH_VALUE: &str = "";

// =============================================================================
// Remote Patterns
// =============================================================================

/// Separator between entries in the remote patterns list
pub const REMOTE_PATTERN_SEPARATOR: char = ',';

/// URL prefixes that mark a token as a full URL rather than a bare host
pub const URL_PREFIXES: &[&str] = &["http://", "https://"];

/// Wildcard matching exactly one hostname label
pub const WILDCARD_LABEL: &str = "*";

/// Wildcard matching one or more leading hostname labels
pub const WILDCARD_SUBDOMAINS: &str = "**";

// =============================================================================
// Framework Flags
// =============================================================================

/// Strict mode is always on for the frontend build
pub const REACT_STRICT_MODE: bool = true;

/// Minification is always on for the frontend build
pub const SWC_MINIFY: bool = true;

/// Font optimization is always on for the frontend build
pub const OPTIMIZE_FONTS: bool = true;
