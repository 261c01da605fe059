//! Start command
//!
//! Start a session and hand over to the interactive loop.

use anyhow::{Context, Result};
use clap::Args;
use ft_core::config::Config;

use crate::session_loop::SessionLoop;

/// Arguments for the start command
#[derive(Debug, Args)]
pub struct StartArgs {
    /// What you are going to work on
    #[arg(short, long)]
    pub task: String,

    /// Planned duration in minutes
    #[arg(short, long, default_value = "25")]
    pub minutes: u32,
}

/// Execute the start command
pub fn execute(args: StartArgs, config: Config) -> Result<()> {
    let mut session_loop = SessionLoop::new(config, std::io::stdout());
    session_loop
        .start_session(&args.task, args.minutes)
        .context("Cannot start session")?;
    session_loop.run()
}
