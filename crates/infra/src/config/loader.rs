//! Configuration loader
//!
//! Loads service configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CREDWATCH_LOOKUP_TIMEOUT_SECS`: Per-lookup timeout in seconds
//!   (required)
//! - `CREDWATCH_LOG_LEVEL`: Tracing filter directive (required)
//! - `CREDWATCH_NOTIFY_PROGRESS`: Emit a progress notification per result
//!   (true/false, default false)
//! - `CREDWATCH_LOG_JSON`: Emit JSON log lines (true/false, default false)
//!
//! ## File Locations
//! The loader probes `credwatch.{toml,json}` then `config.{toml,json}` in
//! the current directory, its parent and grandparent, then next to the
//! executable.

use std::path::{Path, PathBuf};

use credwatch_domain::constants::{
    ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_LOOKUP_TIMEOUT_SECS, ENV_NOTIFY_PROGRESS,
};
use credwatch_domain::{Config, CredWatchError, LeakCheckConfig, LoggingConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["credwatch.toml", "credwatch.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CredWatchError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `CredWatchError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let lookup_timeout_secs = env_var(ENV_LOOKUP_TIMEOUT_SECS).and_then(|s| {
        s.parse::<u64>()
            .map_err(|e| CredWatchError::Config(format!("Invalid lookup timeout: {}", e)))
    })?;
    let level = env_var(ENV_LOG_LEVEL)?;

    let config = Config {
        leak_check: LeakCheckConfig {
            notify_progress: env_bool(ENV_NOTIFY_PROGRESS, false),
            lookup_timeout_secs,
        },
        logging: LoggingConfig { level, json: env_bool(ENV_LOG_JSON, false) },
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations with
/// [`probe_config_paths`]. The format is picked from the file extension.
///
/// # Errors
/// Returns `CredWatchError::Config` if the file is missing, unreadable, or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CredWatchError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CredWatchError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CredWatchError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CredWatchError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CredWatchError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CredWatchError::Config(format!("Unsupported config format: {}", extension))),
    }?;
    config.validate()?;
    Ok(config)
}

/// First existing config file in the standard locations, if any
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
        dirs.push(cwd.join("../.."));
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CredWatchError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or unrecognized values yield `default`.
fn env_bool(key: &str, default: bool) -> bool {
    let Ok(value) = std::env::var(key) else {
        return default;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %value, default, "Unrecognized boolean, using default");
            default
        }
    }
}
