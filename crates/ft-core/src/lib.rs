//! ft-core - Core library for focus-timer
//!
//! This crate provides the core logic for the focus timer: the session
//! state machine, the controller that validates intents and derives the
//! countdown, the history read model, and the tick source that drives it.

pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod ticker;
pub mod types;

pub use error::{FocusError, Result, ValidationError};
pub use types::*;
