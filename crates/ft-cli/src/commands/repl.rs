//! Repl command
//!
//! Interactive prompt with no session running yet.

use anyhow::Result;
use ft_core::config::Config;

use crate::session_loop::SessionLoop;

/// Execute the repl command
pub fn execute(config: Config) -> Result<()> {
    let mut session_loop = SessionLoop::new(config, std::io::stdout());
    session_loop.print_help()?;
    session_loop.run()
}
