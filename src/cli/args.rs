//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{LoadOptions, ENV_FILE_OVERRIDE_VAR};

/// Frontend build configuration loader
#[derive(Parser, Debug)]
#[command(name = "web-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Env file to merge (defaults to ../.env)
    #[arg(long, global = true, env = ENV_FILE_OVERRIDE_VAR)]
    pub env_file: Option<PathBuf>,

    /// Do not merge any env file (takes precedence over --env-file)
    #[arg(long, global = true)]
    pub no_env_file: bool,

    /// Ignore the current process environment
    #[arg(long, global = true)]
    pub no_inherit: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Loader options derived from the global flags
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            env_file: if self.no_env_file {
                None
            } else {
                self.env_file.clone()
            },
            skip_env_file: self.no_env_file,
            inherit_process_env: !self.no_inherit,
            export_to_process: false,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the assembled configuration as JSON
    Show(ShowArgs),

    /// Print the public env block as KEY=VALUE lines
    Env,

    /// Check whether an image URL is allowed by the remote patterns
    Check(CheckArgs),
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Image URL to check (e.g., "https://cdn.example.com/a.png")
    pub url: String,
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_parse_show_pretty() {
        let cli = Cli::try_parse_from(["web-config", "show", "--pretty"]).unwrap();
        assert!(matches!(cli.command, Commands::Show(ShowArgs { pretty: true })));
    }

    #[test]
    #[serial]
    fn test_load_options_from_flags() {
        let cli = Cli::try_parse_from(["web-config", "--no-env-file", "--no-inherit", "env"])
            .unwrap();
        let options = cli.load_options();

        assert!(options.skip_env_file);
        assert!(!options.inherit_process_env);
        assert!(!options.export_to_process);
    }

    #[test]
    #[serial]
    fn test_no_env_file_wins_over_env_file_flag() {
        let cli = Cli::try_parse_from([
            "web-config",
            "--env-file",
            "/srv/shared/.env",
            "--no-env-file",
            "show",
        ])
        .unwrap();
        let options = cli.load_options();

        assert!(options.skip_env_file);
        assert_eq!(options.env_file, None);
    }

    #[test]
    #[serial]
    fn test_no_env_file_wins_over_env_var() {
        std::env::set_var(ENV_FILE_OVERRIDE_VAR, "/srv/shared/.env");
        let result = Cli::try_parse_from(["web-config", "--no-env-file", "show"]);
        std::env::remove_var(ENV_FILE_OVERRIDE_VAR);

        let options = result.unwrap().load_options();
        assert!(options.skip_env_file);
        assert_eq!(options.env_file, None);
    }

    #[test]
    #[serial]
    fn test_env_file_from_env_var() {
        std::env::set_var(ENV_FILE_OVERRIDE_VAR, "/srv/shared/.env");
        let result = Cli::try_parse_from(["web-config", "show"]);
        std::env::remove_var(ENV_FILE_OVERRIDE_VAR);

        let options = result.unwrap().load_options();
        assert_eq!(options.env_file, Some(PathBuf::from("/srv/shared/.env")));
    }

    #[test]
    #[serial]
    fn test_check_requires_url() {
        assert!(Cli::try_parse_from(["web-config", "check"]).is_err());
    }
}
