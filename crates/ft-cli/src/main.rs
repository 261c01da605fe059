//! focus - terminal focus timer
//!
//! Name a task, pick a duration, and count down. Each session is recorded as
//! completed or interrupted for the lifetime of the process.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start a 25 minute session
//! focus start --task "Write paper" --minutes 25
//!
//! # Open the interactive prompt without starting anything
//! focus repl
//!
//! # Inspect configuration
//! focus config show
//! ```

mod commands;
mod render;
mod session_loop;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
