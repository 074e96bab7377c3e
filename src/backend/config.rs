//! Review configuration file support.
//!
//! This module provides utilities for reading backend and fetch settings
//! from TOML configuration files or the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::error::BackendError;
use super::factory::BackendType;

/// Review core configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    pub backend: BackendSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
}

/// Backend type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(rename = "type")]
    pub backend_type: String,
}

/// Request bound settings.
///
/// Every backend call is bounded so a cold backend produces a
/// distinguishable timeout error instead of an indefinite hang.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_entries_timeout_ms")]
    pub entries_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_entries_timeout_ms() -> u64 {
    10_000
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            entries_timeout_ms: default_entries_timeout_ms(),
        }
    }
}

/// Resolved request bounds handed to the fetch coordinator and session.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Bound on every metadata round-trip (job state, workflow, variants).
    pub request_timeout: Duration,
    /// Bound on entry payload fetches, which can be noticeably larger.
    pub entries_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchSettings::default().resolve()
    }
}

impl FetchConfig {
    /// Read request bounds from the environment.
    ///
    /// Honors `TTR_REQUEST_TIMEOUT_MS` and `TTR_ENTRIES_TIMEOUT_MS`;
    /// anything unset or unparsable falls back to the defaults.
    pub fn from_env() -> Self {
        let mut settings = FetchSettings::default();
        if let Ok(val) = std::env::var("TTR_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                settings.request_timeout_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("TTR_ENTRIES_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                settings.entries_timeout_ms = ms;
            }
        }
        settings.resolve()
    }
}

impl FetchSettings {
    /// Convert raw millisecond settings into durations.
    pub fn resolve(&self) -> FetchConfig {
        FetchConfig {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            entries_timeout: Duration::from_millis(self.entries_timeout_ms),
        }
    }
}

impl ReviewConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ReviewConfig)` if successful
    /// * `Err(BackendError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BackendError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            BackendError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: ReviewConfig = toml::from_str(&content).map_err(|e| {
            BackendError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `review.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, BackendError> {
        let search_paths = vec![
            PathBuf::from("review.toml"),
            PathBuf::from("config/review.toml"),
            PathBuf::from("../review.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(BackendError::configuration(
            "No review.toml found in standard locations".to_string(),
        ))
    }

    /// Get the backend type from configuration.
    pub fn backend_type(&self) -> Result<BackendType, String> {
        BackendType::from_str(&self.backend.backend_type)
    }

    /// Resolved request bounds.
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.resolve()
    }
}
