//! Show command - Prints the assembled configuration as JSON.

use std::io::{self, Write};

use crate::cli::args::ShowArgs;
use crate::config::FrameworkConfig;
use crate::errors::AppResult;

/// Execute the show command
pub fn execute(args: ShowArgs, config: &FrameworkConfig) -> AppResult<()> {
    let rendered = render(config, args.pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}

/// Serialize the configuration for build tooling
pub fn render(config: &FrameworkConfig, pretty: bool) -> AppResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(config)?
    } else {
        serde_json::to_string(config)?
    };
    Ok(rendered)
}
