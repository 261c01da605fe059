//! Countdown read model

use serde::Serialize;
use std::fmt;

/// Remaining time of the active session, split for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    remaining_seconds: u64,
}

impl Countdown {
    pub fn from_seconds(remaining_seconds: u64) -> Self {
        Self { remaining_seconds }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Whole minutes left
    pub fn minutes(&self) -> u64 {
        self.remaining_seconds / 60
    }

    /// Seconds left within the current minute
    pub fn seconds(&self) -> u64 {
        self.remaining_seconds % 60
    }

    /// Minutes as a zero-padded two-digit string
    pub fn minutes_display(&self) -> String {
        format!("{:02}", self.minutes())
    }

    /// Seconds as a zero-padded two-digit string
    pub fn seconds_display(&self) -> String {
        format!("{:02}", self.seconds())
    }

    pub fn is_zero(&self) -> bool {
        self.remaining_seconds == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minutes_display(), self.seconds_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let countdown = Countdown::from_seconds(25 * 60 - 20);
        assert_eq!(countdown.minutes(), 24);
        assert_eq!(countdown.seconds(), 40);
        assert_eq!(countdown.to_string(), "24:40");
    }

    #[test]
    fn test_zero_padding() {
        let countdown = Countdown::from_seconds(65);
        assert_eq!(countdown.minutes_display(), "01");
        assert_eq!(countdown.seconds_display(), "05");
        assert_eq!(Countdown::default().to_string(), "00:00");
        assert!(Countdown::default().is_zero());
    }
}
