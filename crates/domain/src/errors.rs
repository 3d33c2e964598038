//! Error types used throughout CredWatch

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CredWatch
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CredWatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CredWatch operations
pub type Result<T> = std::result::Result<T, CredWatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = CredWatchError::Network("connection reset".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"Network","message":"connection reset"}"#);

        let back: CredWatchError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn display_includes_category() {
        assert_eq!(
            CredWatchError::Auth("token expired".into()).to_string(),
            "Authentication error: token expired"
        );
    }
}
