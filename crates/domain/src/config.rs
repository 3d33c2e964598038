//! Configuration structures
//!
//! Every field has a serde default so partial config files are accepted.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_JSON, DEFAULT_LOG_LEVEL, DEFAULT_LOOKUP_TIMEOUT_SECS, DEFAULT_NOTIFY_PROGRESS,
};
use crate::errors::{CredWatchError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Service behaviour
    #[serde(default)]
    pub leak_check: LeakCheckConfig,
    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject values no source may supply
    ///
    /// # Errors
    /// Returns `CredWatchError::Config` when the lookup timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.leak_check.lookup_timeout_secs == 0 {
            return Err(CredWatchError::Config(
                "lookup_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bulk leak check behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakCheckConfig {
    /// Emit a `Running` state notification after every resolved credential
    #[serde(default = "default_notify_progress")]
    pub notify_progress: bool,
    /// Upper bound for a single lookup request
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

impl LeakCheckConfig {
    /// [`lookup_timeout_secs`](Self::lookup_timeout_secs) as a `Duration`
    pub fn lookup_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.lookup_timeout_secs)
    }
}

impl Default for LeakCheckConfig {
    fn default() -> Self {
        Self {
            notify_progress: DEFAULT_NOTIFY_PROGRESS,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `credwatch_infra=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the plain formatter
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: DEFAULT_LOG_JSON }
    }
}

fn default_notify_progress() -> bool {
    DEFAULT_NOTIFY_PROGRESS
}

fn default_lookup_timeout_secs() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
