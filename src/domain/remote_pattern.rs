//! Remote image host patterns.
//!
//! A remote pattern is an allow-list entry naming a scheme and host from
//! which the frontend may load externally hosted images. Patterns arrive as
//! one comma-separated string, where each entry is either a full URL
//! (`https://images.example.com`) or a bare hostname (`cdn.example.com`,
//! implicitly `http`).

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{
    REMOTE_PATTERN_SEPARATOR, URL_PREFIXES, WILDCARD_LABEL, WILDCARD_SUBDOMAINS,
};
use crate::errors::{AppError, AppResult};

/// URL scheme accepted for remote images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Scheme token without the trailing colon
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    /// Map a URL scheme onto a protocol, if it is one we accept
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allowed remote image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePattern {
    pub protocol: Protocol,
    pub hostname: String,
}

impl RemotePattern {
    pub fn new(protocol: Protocol, hostname: impl Into<String>) -> Self {
        Self {
            protocol,
            hostname: hostname.into(),
        }
    }

    /// Parse a single pattern entry.
    ///
    /// Entries starting with `http://` or `https://` must be valid URLs;
    /// anything else is taken verbatim as an `http` hostname.
    pub fn parse(token: &str) -> AppResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::invalid_remote_pattern(token, "empty hostname"));
        }

        if !URL_PREFIXES.iter().any(|prefix| token.starts_with(prefix)) {
            return Ok(Self::new(Protocol::Http, token));
        }

        let url = Url::parse(token)
            .map_err(|e| AppError::invalid_remote_pattern(token, e.to_string()))?;
        let protocol = Protocol::from_scheme(url.scheme())
            .ok_or_else(|| AppError::invalid_remote_pattern(token, "unsupported scheme"))?;
        let hostname = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AppError::invalid_remote_pattern(token, "missing host"))?;

        Ok(Self::new(protocol, hostname))
    }

    /// Check whether a remote URL is covered by this pattern.
    ///
    /// The scheme must match exactly. Hostnames are compared label by label,
    /// ignoring ASCII case: `*` stands for exactly one label and a leading
    /// `**` for one or more.
    pub fn matches(&self, url: &Url) -> bool {
        if Protocol::from_scheme(url.scheme()) != Some(self.protocol) {
            return false;
        }

        url.host_str()
            .is_some_and(|host| hostname_matches(&self.hostname, host))
    }
}

impl fmt::Display for RemotePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.hostname)
    }
}

/// Parse the comma-separated remote patterns list.
///
/// Returns `None` when the input is absent or holds no entries. Order and
/// duplicates are preserved. A URL-looking entry that fails to parse fails
/// the whole list.
pub fn parse_remote_patterns(input: Option<&str>) -> AppResult<Option<Vec<RemotePattern>>> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let mut patterns = Vec::new();
    for token in input.split(REMOTE_PATTERN_SEPARATOR) {
        let token = token.trim();
        if token.is_empty() {
            tracing::warn!(input, "Skipping empty remote pattern entry");
            continue;
        }
        patterns.push(RemotePattern::parse(token)?);
    }

    if patterns.is_empty() {
        return Ok(None);
    }

    tracing::debug!(count = patterns.len(), "Parsed remote patterns");
    Ok(Some(patterns))
}

fn hostname_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();
    let pattern_labels: Vec<&str> = pattern.split('.').collect();
    let host_labels: Vec<&str> = host.split('.').collect();

    match pattern_labels.split_first() {
        Some((&first, rest)) if first == WILDCARD_SUBDOMAINS => {
            host_labels.len() > rest.len()
                && labels_match(rest, &host_labels[host_labels.len() - rest.len()..])
        }
        _ => labels_match(&pattern_labels, &host_labels),
    }
}

fn labels_match(pattern: &[&str], host: &[&str]) -> bool {
    pattern.len() == host.len()
        && pattern
            .iter()
            .zip(host)
            .all(|(p, h)| *p == WILDCARD_LABEL || p == h)
}
