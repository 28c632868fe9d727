//! Env command - Prints the public env block in dotenv form.

use std::io::{self, Write};

use crate::config::FrameworkConfig;
use crate::errors::AppResult;

/// Execute the env command
pub fn execute(config: &FrameworkConfig) -> AppResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(render(config).as_bytes())?;
    Ok(())
}

/// One `KEY=VALUE` line per public variable, values JSON-quoted when they
/// would not survive a dotenv round trip unquoted.
pub fn render(config: &FrameworkConfig) -> String {
    config
        .env
        .entries()
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, quote(value)))
        .collect()
}

fn quote(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$'));
    if needs_quotes {
        serde_json::Value::from(value).to_string()
    } else {
        value.to_string()
    }
}
