//! web-config - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use web_config::{
    cli::{Cli, Commands},
    commands,
    config::FrameworkConfig,
};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration; any failure here aborts the build
    let config = match FrameworkConfig::load(&cli.load_options()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(code = e.code(), "Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args, &config).map(|()| true),
        Commands::Env => commands::env::execute(&config).map(|()| true),
        Commands::Check(args) => commands::check::execute(args, &config),
    };

    // Handle errors
    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(code = e.code(), "Command failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
