//! Configuration system for roomsort.
//!
//! Load solver configuration from TOML or YAML to control the burrow
//! layout, search budgets and invariant checking without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use roomsort_config::{EnvironmentMode, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [layout]
//!     hallway_width = 11
//!     door_columns = [2, 4, 6, 8]
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     step_count_limit = 1000000
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.step_limit(), Some(1_000_000));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use roomsort_config::SolverConfig;
//!
//! let config = SolverConfig::load("roomsort.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use roomsort_core::{Topology, Weights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode controlling invariant checks.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Burrow layout overrides.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Log a progress event every this many expanded states.
    #[serde(default)]
    pub progress_interval: Option<u64>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the expanded-state budget.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the layout section.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the expanded-state budget, if configured.
    pub fn step_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.step_count_limit)
    }
}

/// Environment mode affecting invariant checks during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No checks beyond what the search needs.
    #[default]
    NonAsserted,

    /// Checks the token census of the final state.
    FastAssert,

    /// Checks every expanded state and every generated move.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if any assertions are enabled.
    pub fn is_asserted(self) -> bool {
        self != EnvironmentMode::NonAsserted
    }

    /// Returns true if per-state and per-move assertions are enabled.
    pub fn is_fully_asserted(self) -> bool {
        self == EnvironmentMode::FullAssert
    }
}

/// Burrow layout overrides.
///
/// When `door_columns` is given, `hallway_width` must be given too; without
/// either the shape comes from the puzzle input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LayoutConfig {
    /// Number of hallway cells.
    pub hallway_width: Option<usize>,

    /// Hallway column above each room, left to right.
    pub door_columns: Option<Vec<usize>>,

    /// Movement weight per kind, in kind order.
    pub weights: Option<Vec<u64>>,
}

impl LayoutConfig {
    /// Builds the configured topology, if the layout names one.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if only one of width and doors is set, or if the
    /// shape itself is malformed.
    pub fn topology(&self) -> Result<Option<Topology>, ConfigError> {
        match (self.hallway_width, &self.door_columns) {
            (Some(width), Some(doors)) => Topology::new(width, doors)
                .map(Some)
                .map_err(|e| ConfigError::Invalid(e.to_string())),
            (None, None) => Ok(None),
            _ => Err(ConfigError::Invalid(
                "hallway_width and door_columns must be set together".to_string(),
            )),
        }
    }

    /// Builds the configured weights, if any.
    pub fn weights(&self) -> Result<Option<Weights>, ConfigError> {
        self.weights
            .clone()
            .map(Weights::new)
            .transpose()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend searching.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of expanded states.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
