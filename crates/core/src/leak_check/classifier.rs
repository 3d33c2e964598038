//! Maps low-level failure causes to service error states

use credwatch_domain::{BulkLeakCheckState, LeakDetectionError};

/// Error state entered for a failure cause
///
/// Total over [`LeakDetectionError`]; never yields `Idle` or `Running`.
pub fn classify(error: LeakDetectionError) -> BulkLeakCheckState {
    BulkLeakCheckState::from(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        let table = [
            (LeakDetectionError::NotSignedIn, BulkLeakCheckState::SignedOut),
            (LeakDetectionError::TokenRequestFailure, BulkLeakCheckState::TokenRequestFailure),
            (LeakDetectionError::HashingFailure, BulkLeakCheckState::HashingFailure),
            (LeakDetectionError::InvalidServerResponse, BulkLeakCheckState::ServiceError),
            (LeakDetectionError::NetworkError, BulkLeakCheckState::NetworkError),
        ];
        for (cause, expected) in table {
            assert_eq!(classify(cause), expected);
        }
    }

    #[test]
    fn test_never_classifies_into_idle_or_running() {
        for cause in LeakDetectionError::ALL {
            let state = classify(cause);
            assert_ne!(state, BulkLeakCheckState::Idle);
            assert_ne!(state, BulkLeakCheckState::Running);
        }
    }
}
