//! Session intent validation

use crate::config::TimerConfig;
use crate::error::ValidationError;

/// Shortest plannable session, in minutes
pub const MIN_PLANNED_MINUTES: u32 = 5;

/// Longest plannable session, in minutes
pub const MAX_PLANNED_MINUTES: u32 = 60;

/// Validator for new-session input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionValidator {
    min_minutes: u32,
    max_minutes: u32,
}

impl SessionValidator {
    /// Create a new validator with the default 5..=60 minute range
    pub fn new() -> Self {
        Self {
            min_minutes: MIN_PLANNED_MINUTES,
            max_minutes: MAX_PLANNED_MINUTES,
        }
    }

    /// Create a validator with custom bounds (inclusive).
    ///
    /// Bounds can only narrow the range; anything outside 5..=60 is clamped.
    pub fn with_bounds(min_minutes: u32, max_minutes: u32) -> Self {
        Self {
            min_minutes: min_minutes.max(MIN_PLANNED_MINUTES),
            max_minutes: max_minutes.min(MAX_PLANNED_MINUTES),
        }
    }

    pub fn from_config(config: &TimerConfig) -> Self {
        Self::with_bounds(config.min_minutes, config.max_minutes)
    }

    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    /// Validate a task name, returning it trimmed
    pub fn validate_task<'a>(&self, task: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = task.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        Ok(trimmed)
    }

    /// Validate a planned duration
    pub fn validate_minutes(&self, minutes: u32) -> Result<(), ValidationError> {
        if !(self.min_minutes..=self.max_minutes).contains(&minutes) {
            return Err(ValidationError::MinutesOutOfRange {
                minutes,
                min: self.min_minutes,
                max: self.max_minutes,
            });
        }
        Ok(())
    }

    /// Validate a complete new-session request
    pub fn validate<'a>(&self, task: &'a str, minutes: u32) -> Result<&'a str, ValidationError> {
        let task = self.validate_task(task)?;
        self.validate_minutes(minutes)?;
        Ok(task)
    }
}

impl Default for SessionValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid() {
        let validator = SessionValidator::new();
        assert_eq!(validator.validate("Write paper", 25), Ok("Write paper"));
        assert_eq!(validator.validate("  Read  ", 5), Ok("Read"));
        assert!(validator.validate("Read", 60).is_ok());
    }

    #[test]
    fn test_validate_empty_task() {
        let validator = SessionValidator::new();
        assert_eq!(validator.validate("", 25), Err(ValidationError::EmptyTask));
        assert_eq!(validator.validate("   ", 25), Err(ValidationError::EmptyTask));
    }

    #[test]
    fn test_validate_minutes_bounds() {
        let validator = SessionValidator::new();
        for minutes in [0, 4, 61, 120] {
            assert_eq!(
                validator.validate("Task", minutes),
                Err(ValidationError::MinutesOutOfRange {
                    minutes,
                    min: 5,
                    max: 60
                })
            );
        }
    }

    #[test]
    fn test_custom_bounds_narrow() {
        let validator = SessionValidator::with_bounds(10, 45);
        assert!(validator.validate_minutes(10).is_ok());
        assert!(validator.validate_minutes(45).is_ok());
        assert!(validator.validate_minutes(9).is_err());
        assert!(validator.validate_minutes(46).is_err());
    }

    #[test]
    fn test_custom_bounds_never_widen() {
        let validator = SessionValidator::with_bounds(1, 240);
        assert_eq!(validator.min_minutes(), MIN_PLANNED_MINUTES);
        assert_eq!(validator.max_minutes(), MAX_PLANNED_MINUTES);
        assert!(validator.validate_minutes(1).is_err());
        assert!(validator.validate_minutes(240).is_err());
    }

    #[test]
    fn test_from_config() {
        let validator = SessionValidator::from_config(&TimerConfig::default());
        assert_eq!(validator, SessionValidator::default());
    }
}
