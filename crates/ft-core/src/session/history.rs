//! History read model
//!
//! Read-only rows for a history table, derived from the store's sessions.

use super::model::{Session, SessionStatus};
use crate::types::SessionId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the session history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: SessionId,
    pub task: String,
    pub planned_minutes: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

impl HistoryEntry {
    /// Planned duration, e.g. "25 minutes"
    pub fn duration_label(&self) -> String {
        plural(u64::from(self.planned_minutes), "minute")
    }

    /// Age of the session relative to `now`, e.g. "2 months ago"
    pub fn started_label(&self, now: DateTime<Utc>) -> String {
        relative_age(self.started_at, now)
    }

    /// Build history rows, newest first
    pub fn collect<'a>(
        sessions: impl IntoIterator<Item = &'a Session>,
        filter: &HistoryFilter,
    ) -> Vec<HistoryEntry> {
        let mut entries: Vec<_> = sessions
            .into_iter()
            .map(HistoryEntry::from)
            .filter(|e| filter.matches(e))
            .collect();
        // stable sort keeps creation order among equal start times
        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        if let Some(limit) = filter.limit {
            entries.truncate(limit);
        }
        entries
    }
}

impl From<&Session> for HistoryEntry {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().clone(),
            task: session.task().to_string(),
            planned_minutes: session.planned_minutes(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            status: session.status(),
        }
    }
}

/// Filter criteria for history rows
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Only rows with this status
    pub status: Option<SessionStatus>,
    /// Task substring (case-insensitive)
    pub task: Option<String>,
    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check if a row matches this filter
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(status) = self.status {
            if entry.status != status {
                return false;
            }
        }

        if let Some(ref task) = self.task {
            if !entry.task.to_lowercase().contains(&task.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Coarse "time ago" label for `then` as seen from `now`
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }

    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let label = if minutes < 60 {
        plural(minutes as u64, "minute")
    } else if hours < 24 {
        plural(hours as u64, "hour")
    } else if days < 30 {
        plural(days as u64, "day")
    } else if days < 365 {
        plural((days / 30) as u64, "month")
    } else {
        plural((days / 365) as u64, "year")
    };
    format!("{} ago", label)
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
