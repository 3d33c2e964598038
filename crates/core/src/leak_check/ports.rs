//! Port interfaces for bulk leak checking
//!
//! These traits define the boundaries between the leak check service and the
//! infrastructure that performs the actual lookups.

use std::sync::Arc;

use async_trait::async_trait;
use credwatch_domain::{
    AccessToken, BulkLeakCheckState, IsLeaked, LeakCheckCredential, LeakDetectionError,
    LookupSingleLeakPayload, LookupSingleLeakResponse, Result, SavedCredential,
};

/// Callbacks from a running bulk leak check
///
/// Each credential is reported at most once. After `on_error` the operation
/// reports nothing further.
pub trait BulkLeakCheckDelegate: Send + Sync {
    /// A submitted credential has been looked up
    fn on_finished_credential(&self, credential: LeakCheckCredential, is_leaked: IsLeaked);

    /// The operation failed and abandons all remaining credentials
    fn on_error(&self, error: LeakDetectionError);
}

/// One in-flight bulk leak check operation
pub trait BulkLeakCheck: Send + Sync {
    /// Append credentials to the operation
    fn check_credentials(&self, credentials: Vec<LeakCheckCredential>);

    /// Stop processing. No delegate calls are expected afterwards, but
    /// callers must tolerate ones that were already underway.
    fn cancel(&self);
}

/// Creates bulk leak check operations
pub trait LeakDetectionCheckFactory: Send + Sync {
    /// Start a new operation reporting to `delegate`
    ///
    /// # Errors
    /// Returns the cause when an operation cannot be started, for example
    /// [`LeakDetectionError::NotSignedIn`] when no account is available.
    fn try_create_bulk_leak_check(
        &self,
        delegate: Arc<dyn BulkLeakCheckDelegate>,
        identity: Arc<dyn IdentityProvider>,
        transport: Arc<dyn LeakLookupTransport>,
    ) -> std::result::Result<Box<dyn BulkLeakCheck>, LeakDetectionError>;
}

/// Source of the signed-in account and its access tokens
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Primary account, if one is signed in
    fn primary_account(&self) -> Option<String>;

    /// Fetch a token authorizing lookups for the primary account
    async fn fetch_access_token(&self) -> Result<AccessToken>;
}

/// Backend answering single leak lookups
#[async_trait]
pub trait LeakLookupTransport: Send + Sync {
    async fn lookup_single_leak(
        &self,
        token: &AccessToken,
        payload: &LookupSingleLeakPayload,
    ) -> Result<LookupSingleLeakResponse>;
}

/// Receives service state changes and per-credential results
pub trait BulkLeakCheckObserver: Send + Sync {
    /// Called whenever the `(state, pending)` pair changes
    fn on_state_changed(&self, state: BulkLeakCheckState, pending_checks: usize);

    /// Called once for every credential that resolved
    fn on_result_found(&self, credential: &LeakCheckCredential, is_leaked: IsLeaked);
}

/// Saved passwords available to the settings surface
pub trait SavedPasswordsProvider: Send + Sync {
    fn saved_passwords(&self) -> Vec<SavedCredential>;
}
