//! Configuration management for focus-timer

use crate::error::{FocusError, Result};
use crate::session::{MAX_PLANNED_MINUTES, MIN_PLANNED_MINUTES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timer settings
    pub timer: TimerConfig,
    /// UI settings
    pub ui: UiConfig,
}

impl Config {
    /// Default config file location (`<config dir>/focus-timer/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "focus-timer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a malformed or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.timer.validate()
    }
}

/// Timer-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Shortest session a user may plan, at least 5
    pub min_minutes: u32,
    /// Longest session a user may plan, at most 60
    pub max_minutes: u32,
    /// Increment shown as a hint next to the minutes input; not enforced
    pub minutes_step: u32,
    /// Interval between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Finish the session automatically when the countdown reaches zero
    pub auto_finish: bool,
}

impl TimerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.min_minutes < MIN_PLANNED_MINUTES {
            return Err(FocusError::Config(format!(
                "timer.min_minutes must be at least {}, got {}",
                MIN_PLANNED_MINUTES, self.min_minutes
            )));
        }
        if self.max_minutes > MAX_PLANNED_MINUTES {
            return Err(FocusError::Config(format!(
                "timer.max_minutes must be at most {}, got {}",
                MAX_PLANNED_MINUTES, self.max_minutes
            )));
        }
        if self.min_minutes > self.max_minutes {
            return Err(FocusError::Config(format!(
                "timer.min_minutes ({}) exceeds timer.max_minutes ({})",
                self.min_minutes, self.max_minutes
            )));
        }
        if self.minutes_step < 1 {
            return Err(FocusError::Config(
                "timer.minutes_step must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(FocusError::Config(
                "timer.tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            min_minutes: MIN_PLANNED_MINUTES,
            max_minutes: MAX_PLANNED_MINUTES,
            minutes_step: 5,
            tick_interval_ms: 1000,
            auto_finish: true,
        }
    }
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Task names offered as suggestions
    pub task_suggestions: Vec<String>,
    /// Print the countdown every this many seconds (0 disables)
    pub countdown_every_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            task_suggestions: vec![
                "Project 1".to_string(),
                "Project 2".to_string(),
                "Project 3".to_string(),
            ],
            countdown_every_secs: 60,
        }
    }
}
