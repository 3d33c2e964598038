//! In-memory leak lookup backend
//!
//! Answers lookups from a set of known leaked credential digests. Failures
//! and latency can be injected, which makes it the transport of choice for
//! development setups and tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use credwatch_core::LeakLookupTransport;
use credwatch_domain::{
    AccessToken, CredWatchError, LookupSingleLeakPayload, LookupSingleLeakResponse, Result,
};
use parking_lot::{Mutex, RwLock};

use super::errors::LeakDetectionFailure;
use super::hashing::build_lookup_payload;

#[derive(Debug, Default)]
pub struct InMemoryLeakLookup {
    leaked: RwLock<HashSet<String>>,
    failure: Mutex<Option<CredWatchError>>,
    latency: Option<Duration>,
    lookups: AtomicUsize,
}

impl InMemoryLeakLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every lookup by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Record a credential as leaked
    ///
    /// # Errors
    /// Fails when the credential cannot be hashed.
    pub fn mark_leaked(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), LeakDetectionFailure> {
        let payload = build_lookup_payload(username, password)?;
        self.leaked.write().insert(payload.credential_digest);
        Ok(())
    }

    /// Make every following lookup fail with `error`, or succeed again with
    /// `None`
    pub fn fail_with(&self, error: Option<CredWatchError>) {
        *self.failure.lock() = error;
    }

    /// Number of lookups served so far, including failed ones
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeakLookupTransport for InMemoryLeakLookup {
    async fn lookup_single_leak(
        &self,
        token: &AccessToken,
        payload: &LookupSingleLeakPayload,
    ) -> Result<LookupSingleLeakResponse> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        if token.secret().is_empty() {
            return Err(CredWatchError::Auth("empty access token".into()));
        }

        let is_leaked = self.leaked.read().contains(&payload.credential_digest);
        Ok(LookupSingleLeakResponse { is_leaked })
    }
}
