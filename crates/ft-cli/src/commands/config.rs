//! Config command
//!
//! Inspect and initialise focus-timer configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use ft_core::config::Config;
use std::path::{Path, PathBuf};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, path: Option<PathBuf>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(path.as_deref(), json),
        ConfigCommand::Path => show_path(path.as_deref()),
        ConfigCommand::Init { force } => init_config(path.as_deref(), force),
    }
}

fn require_path(path: Option<&Path>) -> Result<&Path> {
    path.context("No configuration directory available; pass --config <path>")
}

fn show_config(path: Option<&Path>, as_json: bool) -> Result<()> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match path {
        Some(path) if path.exists() => println!("{}", path.display().to_string().dimmed()),
        _ => println!("{}", "(defaults)".dimmed()),
    }
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn show_path(path: Option<&Path>) -> Result<()> {
    println!("{}", require_path(path)?.display());
    Ok(())
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = require_path(path)?;

    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
