//! Session store and its transition function

use super::model::Session;
use crate::types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Intent applied to a [`SessionStore`]
///
/// Actions carry every timestamp and id the transition needs, so
/// [`SessionStore::apply`] stays a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Append a new session and make it the active one
    StartSession { session: Session },
    /// Close the active session as interrupted
    InterruptActiveSession { at: DateTime<Utc> },
    /// Close the active session as finished
    FinishActiveSession { at: DateTime<Utc> },
    /// Any action tag this version does not recognise
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartSession { .. } => "start_session",
            Action::InterruptActiveSession { .. } => "interrupt_active_session",
            Action::FinishActiveSession { .. } => "finish_active_session",
            Action::Unknown => "unknown",
        }
    }
}

/// Authoritative session state: an append-only list plus the active id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active_session_id: Option<SessionId>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and return the resulting state.
    ///
    /// Total: every input has a defined result and nothing panics. Terminal
    /// actions whose active id does not resolve to a running session leave
    /// the state unchanged.
    pub fn apply(self, action: &Action) -> Self {
        match action {
            Action::StartSession { session } => self.start(session),
            Action::InterruptActiveSession { at } => self.close_active(|s| s.interrupted(*at)),
            Action::FinishActiveSession { at } => self.close_active(|s| s.finished(*at)),
            Action::Unknown => self,
        }
    }

    fn start(mut self, session: &Session) -> Self {
        // ids must resolve to at most one session
        if self.get(session.id()).is_some() {
            return self;
        }
        if !session.is_terminal() {
            self.active_session_id = Some(session.id().clone());
        }
        self.sessions.push(session.clone());
        self
    }

    fn close_active(mut self, close: impl FnOnce(&Session) -> Option<Session>) -> Self {
        let Some(index) = self.active_index() else {
            return self;
        };
        let Some(closed) = close(&self.sessions[index]) else {
            return self;
        };
        self.sessions[index] = closed;
        self.active_session_id = None;
        self
    }

    fn active_index(&self) -> Option<usize> {
        let active_id = self.active_session_id.as_ref()?;
        self.sessions.iter().position(|s| s.id() == active_id)
    }

    /// All sessions in creation order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.active_session_id.as_ref()
    }

    /// The session the active id resolves to, if any
    pub fn active_session(&self) -> Option<&Session> {
        self.active_index().map(|i| &self.sessions[i])
    }

    /// Look up a session by id
    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
