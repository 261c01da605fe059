//! Session management module
//!
//! A session ("cycle") is one focus period: a named task, a planned
//! duration, and a start time, later closed by exactly one of an
//! interruption or a finish.
//!
//! # Overview
//!
//! - [`SessionStore`] holds the authoritative, append-only list of sessions
//!   and the id of the active one. It changes only through
//!   [`SessionStore::apply`], a pure transition over [`Action`]s.
//! - [`SessionController`] wraps the store, validates intents, stamps
//!   actions with the current time and owns the elapsed-seconds counter.
//! - [`SessionView`] is the narrow read interface handed to presentation
//!   code that only renders.
//!
//! # Example
//!
//! ```
//! use ft_core::session::{SessionController, SessionView};
//!
//! let mut controller = SessionController::default();
//! controller.create_session("Write paper", 25)?;
//! controller.tick(20);
//! assert_eq!(controller.remaining_seconds(), 25 * 60 - 20);
//! controller.interrupt_active_session();
//! assert!(controller.active_session().is_none());
//! # Ok::<(), ft_core::ValidationError>(())
//! ```

mod controller;
mod countdown;
mod history;
mod model;
mod store;
mod validator;

// Re-export public API
pub use controller::{SessionController, SessionView, TickOutcome};
pub use countdown::Countdown;
pub use history::{relative_age, HistoryEntry, HistoryFilter};
pub use model::{Session, SessionStatus};
pub use store::{Action, SessionStore};
pub use validator::{SessionValidator, MAX_PLANNED_MINUTES, MIN_PLANNED_MINUTES};
