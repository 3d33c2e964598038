//! Bulk leak check state and failure causes

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_domain_status_conversions;

/// Externally observable state of the bulk leak check service
///
/// `Running` holds exactly while an operation is in flight. The error states
/// end the current operation only; a new submission always starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkLeakCheckState {
    #[default]
    Idle,
    Running,
    SignedOut,
    TokenRequestFailure,
    HashingFailure,
    ServiceError,
    NetworkError,
}

impl_domain_status_conversions!(BulkLeakCheckState {
    Idle => "idle",
    Running => "running",
    SignedOut => "signed_out",
    TokenRequestFailure => "token_request_failure",
    HashingFailure => "hashing_failure",
    ServiceError => "service_error",
    NetworkError => "network_error",
});

impl BulkLeakCheckState {
    pub const ALL: [BulkLeakCheckState; 7] = [
        Self::Idle,
        Self::Running,
        Self::SignedOut,
        Self::TokenRequestFailure,
        Self::HashingFailure,
        Self::ServiceError,
        Self::NetworkError,
    ];

    /// True for the states entered after an operation failed
    pub fn is_error(self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }
}

/// Low-level reason a leak check operation could not start or continue
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeakDetectionError {
    #[error("No signed-in account is available")]
    NotSignedIn,

    #[error("Access token request failed")]
    TokenRequestFailure,

    #[error("Credential hashing failed")]
    HashingFailure,

    #[error("Server returned an invalid response")]
    InvalidServerResponse,

    #[error("Network request failed")]
    NetworkError,
}

impl LeakDetectionError {
    pub const ALL: [LeakDetectionError; 5] = [
        Self::NotSignedIn,
        Self::TokenRequestFailure,
        Self::HashingFailure,
        Self::InvalidServerResponse,
        Self::NetworkError,
    ];

    /// Stable label for log fields and metrics
    pub fn label(self) -> &'static str {
        match self {
            Self::NotSignedIn => "not_signed_in",
            Self::TokenRequestFailure => "token_request_failure",
            Self::HashingFailure => "hashing_failure",
            Self::InvalidServerResponse => "invalid_server_response",
            Self::NetworkError => "network_error",
        }
    }
}

impl From<LeakDetectionError> for BulkLeakCheckState {
    fn from(error: LeakDetectionError) -> Self {
        match error {
            LeakDetectionError::NotSignedIn => Self::SignedOut,
            LeakDetectionError::TokenRequestFailure => Self::TokenRequestFailure,
            LeakDetectionError::HashingFailure => Self::HashingFailure,
            LeakDetectionError::InvalidServerResponse => Self::ServiceError,
            LeakDetectionError::NetworkError => Self::NetworkError,
        }
    }
}
