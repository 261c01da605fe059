//! Session data models

use super::validator::SessionValidator;
use crate::error::FocusError;
use crate::types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single focus session
///
/// Fields are read-only from outside the crate: once created, a session only
/// ever changes by gaining one terminal timestamp, and that change produces
/// a new value rather than mutating in place.
///
/// Deserialization enforces the same rules as creation: a non-empty task, a
/// planned duration of 5 to 60 minutes and at most one terminal timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct Session {
    id: SessionId,
    task: String,
    planned_minutes: u32,
    started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interrupted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new, running session
    pub fn new(
        id: SessionId,
        task: impl Into<String>,
        planned_minutes: u32,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task: task.into(),
            planned_minutes,
            started_at,
            interrupted_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn planned_minutes(&self) -> u32 {
        self.planned_minutes
    }

    /// Planned duration in seconds
    pub fn planned_seconds(&self) -> u64 {
        u64::from(self.planned_minutes) * 60
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn interrupted_at(&self) -> Option<DateTime<Utc>> {
        self.interrupted_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// When the session ended, whichever way it ended
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.interrupted_at.or(self.finished_at)
    }

    /// Whether a terminal timestamp has been recorded
    pub fn is_terminal(&self) -> bool {
        self.ended_at().is_some()
    }

    pub fn status(&self) -> SessionStatus {
        match (self.interrupted_at, self.finished_at) {
            (Some(_), _) => SessionStatus::Interrupted,
            (None, Some(_)) => SessionStatus::Completed,
            (None, None) => SessionStatus::InProgress,
        }
    }

    /// Copy of this session closed by an interruption at `at`.
    /// Returns `None` if the session already ended.
    pub(crate) fn interrupted(&self, at: DateTime<Utc>) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }
        Some(Self {
            interrupted_at: Some(at),
            ..self.clone()
        })
    }

    /// Copy of this session closed by finishing at `at`.
    /// Returns `None` if the session already ended.
    pub(crate) fn finished(&self, at: DateTime<Utc>) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }
        Some(Self {
            finished_at: Some(at),
            ..self.clone()
        })
    }
}

/// Unchecked wire form of [`Session`]
#[derive(Deserialize)]
struct RawSession {
    id: SessionId,
    task: String,
    planned_minutes: u32,
    started_at: DateTime<Utc>,
    #[serde(default)]
    interrupted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawSession> for Session {
    type Error = FocusError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        SessionValidator::new().validate(&raw.task, raw.planned_minutes)?;
        if raw.interrupted_at.is_some() && raw.finished_at.is_some() {
            return Err(FocusError::InvalidSession(format!(
                "session {} is both interrupted and finished",
                raw.id
            )));
        }

        Ok(Self {
            id: raw.id,
            task: raw.task,
            planned_minutes: raw.planned_minutes,
            started_at: raw.started_at,
            interrupted_at: raw.interrupted_at,
            finished_at: raw.finished_at,
        })
    }
}

/// Lifecycle state of a session, derived from its timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Interrupted,
    Completed,
}

impl SessionStatus {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "In progress",
            SessionStatus::Interrupted => "Interrupted",
            SessionStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
