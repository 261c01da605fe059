//! Core type definitions for focus-timer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the timestamp prefix: `YYYYMMDDHHMMSSmmm`
const TIMESTAMP_LEN: usize = 17;

/// Length of the random suffix
const SUFFIX_LEN: usize = 8;

/// Unique identifier for a focus session
/// Format: YYYYMMDDHHMMSSmmm-<short_uuid>
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new SessionId stamped with the given time
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        SessionId(format!(
            "{}-{}",
            at.format("%Y%m%d%H%M%S%3f"),
            &uuid[..SUFFIX_LEN]
        ))
    }

    /// Create from a string with validation
    pub fn from_string(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if Self::validate(&s) {
            Ok(SessionId(s))
        } else {
            Err(crate::FocusError::InvalidSessionId(s))
        }
    }

    fn validate(s: &str) -> bool {
        let Some((stamp, suffix)) = s.split_once('-') else {
            return false;
        };
        stamp.len() == TIMESTAMP_LEN
            && stamp.chars().all(|c| c.is_ascii_digit())
            && suffix.len() == SUFFIX_LEN
            && suffix.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
