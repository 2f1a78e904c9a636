//! Lottery configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::eligibility::{ATTENDED, EligibilityRules, ORGANIZER_FRAME};

/// Operator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// Attendance status meaning "attended".
    #[serde(default = "default_attended_marker")]
    attended_marker: String,

    /// Participation frame excluded from drawing.
    #[serde(default = "default_organizer_frame")]
    organizer_frame: String,

    /// Pause before a winner is revealed, in milliseconds.
    #[serde(default = "default_suspense_ms")]
    suspense_ms: u64,

    /// Directory holding persisted winner history.
    #[serde(default = "default_history_dir")]
    history_dir: PathBuf,
}

#[instrument]
fn default_attended_marker() -> String {
    ATTENDED.to_string()
}

#[instrument]
fn default_organizer_frame() -> String {
    ORGANIZER_FRAME.to_string()
}

#[instrument]
fn default_suspense_ms() -> u64 {
    1500
}

#[instrument]
fn default_history_dir() -> PathBuf {
    PathBuf::from(".lottery")
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            attended_marker: default_attended_marker(),
            organizer_frame: default_organizer_frame(),
            suspense_ms: default_suspense_ms(),
            history_dir: default_history_dir(),
        }
    }
}

impl LotteryConfig {
    /// Loads configuration from a TOML file; omitted keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(history_dir = %config.history_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the history directory.
    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = dir.into();
        self
    }

    /// Eligibility literals for sessions built from this config.
    pub fn rules(&self) -> EligibilityRules {
        EligibilityRules::new(self.attended_marker.clone(), self.organizer_frame.clone())
    }

    /// Suspense pause as a duration.
    pub fn suspense(&self) -> Duration {
        Duration::from_millis(self.suspense_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
