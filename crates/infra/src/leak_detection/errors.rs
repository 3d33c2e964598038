//! Failures raised while checking a single credential
//!
//! [`LeakDetectionFailure`] keeps the detail of what went wrong for logging
//! and retry decisions. The service only ever sees the coarse
//! [`LeakDetectionError`] cause it maps onto.
//!
//! Transport trouble, rejected input and broken invariants are carried as
//! [`CommonError`] so they classify the same way as everywhere else.

use credwatch_common::error::{CommonError, ErrorSeverity};
use credwatch_common::impl_error_classification;
use credwatch_domain::{CredWatchError, LeakDetectionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeakDetectionFailure {
    #[error("Access token request failed: {0}")]
    TokenRequest(CredWatchError),

    #[error("Invalid lookup response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl_error_classification!(LeakDetectionFailure, Common,
    Self::TokenRequest(_) => {
        retryable: true,
        severity: ErrorSeverity::Warning,
        critical: false,
    },
    Self::InvalidResponse(_) => {
        retryable: false,
        severity: ErrorSeverity::Error,
        critical: false,
    }
);

impl LeakDetectionFailure {
    /// Failure while fetching an access token
    pub fn token(error: CredWatchError) -> Self {
        match error {
            CredWatchError::Network(message) => {
                CommonError::backend("identity", message, true).into()
            }
            other => Self::TokenRequest(other),
        }
    }

    /// Failure reported by the lookup transport
    pub fn lookup(error: CredWatchError) -> Self {
        match error {
            CredWatchError::Network(message) => CommonError::backend("lookup", message, true).into(),
            CredWatchError::Internal(message) => CommonError::internal(message).into(),
            other => Self::InvalidResponse(other.to_string()),
        }
    }

    /// Credential rejected before hashing
    pub fn hashing(field: &str, message: &str) -> Self {
        CommonError::validation(field, message).into()
    }

    /// Coarse cause reported to the service
    pub fn cause(&self) -> LeakDetectionError {
        match self {
            Self::TokenRequest(_) => LeakDetectionError::TokenRequestFailure,
            Self::InvalidResponse(_) => LeakDetectionError::InvalidServerResponse,
            Self::Common(common) => match common {
                CommonError::Timeout { .. } | CommonError::Backend { .. } => {
                    LeakDetectionError::NetworkError
                }
                CommonError::Validation { .. } => LeakDetectionError::HashingFailure,
                CommonError::Internal { .. } => LeakDetectionError::InvalidServerResponse,
            },
        }
    }
}

impl From<LeakDetectionFailure> for LeakDetectionError {
    fn from(failure: LeakDetectionFailure) -> Self {
        failure.cause()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use credwatch_common::error::ErrorClassification;

    use super::*;

    #[test]
    fn test_token_failures_split_on_network() {
        let network = LeakDetectionFailure::token(CredWatchError::Network("reset".into()));
        assert_eq!(network.cause(), LeakDetectionError::NetworkError);
        assert!(network.is_retryable());

        let denied = LeakDetectionFailure::token(CredWatchError::Auth("revoked".into()));
        assert_eq!(denied.cause(), LeakDetectionError::TokenRequestFailure);
    }

    #[test]
    fn test_lookup_failures_split_on_network() {
        let network = LeakDetectionFailure::lookup(CredWatchError::Network("dns".into()));
        assert_eq!(network.cause(), LeakDetectionError::NetworkError);
        assert_eq!(network.severity(), ErrorSeverity::Warning);

        let garbage = LeakDetectionFailure::lookup(CredWatchError::InvalidResponse("eof".into()));
        assert_eq!(garbage.cause(), LeakDetectionError::InvalidServerResponse);
        assert!(!garbage.is_retryable());
    }

    #[test]
    fn test_internal_lookup_failure_is_critical() {
        let internal = LeakDetectionFailure::lookup(CredWatchError::Internal("bug".into()));
        assert_eq!(internal.cause(), LeakDetectionError::InvalidServerResponse);
        assert!(internal.is_critical());
    }

    #[test]
    fn test_timeout_and_hashing_causes() {
        let timeout: LeakDetectionFailure =
            CommonError::timeout("lookup_single_leak", Duration::from_secs(1)).into();
        assert_eq!(timeout.cause(), LeakDetectionError::NetworkError);
        assert!(timeout.is_retryable());

        let hashing = LeakDetectionFailure::hashing("username", "empty");
        assert_eq!(LeakDetectionError::from(hashing), LeakDetectionError::HashingFailure);
    }
}
