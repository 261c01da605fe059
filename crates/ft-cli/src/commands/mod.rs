//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod repl;
pub mod start;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ft_core::config::Config;
use std::path::{Path, PathBuf};

/// focus - count down focus sessions and keep their history
#[derive(Debug, Parser)]
#[command(name = "focus")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FOCUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a focus session and follow its countdown
    Start(start::StartArgs),

    /// Open the interactive prompt without starting a session
    Repl,

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = resolve_config_path(cli.config.as_deref());

    // Dispatch to command handler
    match cli.command {
        Commands::Start(args) => start::execute(args, load_config(config_path.as_deref())?),
        Commands::Repl => repl::execute(load_config(config_path.as_deref())?),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

/// Explicit path if given, otherwise the per-user default
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(Config::default_path)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display())),
        None => {
            tracing::debug!("no config directory available, using defaults");
            Ok(Config::default())
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_start_args() {
        let cli = Cli::try_parse_from(["focus", "-vv", "start", "-t", "Write paper", "-m", "25"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.task, "Write paper");
                assert_eq!(args.minutes, 25);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = PathBuf::from("/tmp/focus.toml");
        assert_eq!(resolve_config_path(Some(path.as_path())), Some(path));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().join("none.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }
}
