//! Error types for focus-timer

use thiserror::Error;

/// Rejection of a session intent.
///
/// This is the only error the session core surfaces. It is returned
/// synchronously so a form layer can render it inline and let the user
/// re-submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Task name is empty or whitespace
    #[error("Please, type a task")]
    EmptyTask,

    /// Planned duration outside the allowed range
    #[error("Planned minutes must be between {min} and {max}, got {minutes}")]
    MinutesOutOfRange { minutes: u32, min: u32, max: u32 },

    /// A session is already counting down
    #[error("A session is already active; interrupt or finish it first")]
    SessionAlreadyActive,
}

/// Main error type for focus-timer
#[derive(Debug, Error)]
pub enum FocusError {
    /// Session intent rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing or encoding error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed session identifier
    #[error("Invalid session ID: {0}")]
    InvalidSessionId(String),

    /// Serialized session breaks the session rules
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FocusError>,
    },
}

impl FocusError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FocusError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for FocusError {
    fn from(err: toml::de::Error) -> Self {
        FocusError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for FocusError {
    fn from(err: toml::ser::Error) -> Self {
        FocusError::Toml(err.to_string())
    }
}

/// Result type alias for focus-timer
pub type Result<T> = std::result::Result<T, FocusError>;
