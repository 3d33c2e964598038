//! Domain-level constants
//!
//! Defaults and environment variable names shared by the configuration
//! structures and the loader.

// Leak check defaults
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTIFY_PROGRESS: bool = false;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;

// Environment variables
pub const ENV_LOOKUP_TIMEOUT_SECS: &str = "CREDWATCH_LOOKUP_TIMEOUT_SECS";
pub const ENV_NOTIFY_PROGRESS: &str = "CREDWATCH_NOTIFY_PROGRESS";
pub const ENV_LOG_LEVEL: &str = "CREDWATCH_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "CREDWATCH_LOG_JSON";

// Lookup payload
pub const USERNAME_HASH_PREFIX_BYTES: usize = 3;
pub const CREDENTIAL_DIGEST_SEPARATOR: u8 = 0x00;
