//! Reference bulk leak check running on a tokio task
//!
//! Credentials are queued on an unbounded channel and looked up one at a
//! time in submission order. The first failure is reported to the delegate
//! and ends the operation. Once cancelled (explicitly or by dropping the
//! handle) the worker reports nothing further.

use std::sync::Arc;
use std::time::Duration;

use credwatch_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use credwatch_core::{BulkLeakCheck, BulkLeakCheckDelegate, IdentityProvider, LeakLookupTransport};
use credwatch_domain::{IsLeaked, LeakCheckCredential};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::errors::LeakDetectionFailure;
use super::hashing::build_lookup_payload;

/// Handle to a running worker
pub struct BulkLeakCheckImpl {
    sender: mpsc::UnboundedSender<LeakCheckCredential>,
    cancellation_token: CancellationToken,
}

impl BulkLeakCheckImpl {
    pub(crate) fn new(
        sender: mpsc::UnboundedSender<LeakCheckCredential>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self { sender, cancellation_token }
    }
}

impl BulkLeakCheck for BulkLeakCheckImpl {
    fn check_credentials(&self, credentials: Vec<LeakCheckCredential>) {
        for credential in credentials {
            if self.sender.send(credential).is_err() {
                debug!("Leak check worker has stopped; dropping credentials");
                return;
            }
        }
    }

    fn cancel(&self) {
        self.cancellation_token.cancel();
    }
}

impl Drop for BulkLeakCheckImpl {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

pub(crate) struct LeakCheckWorker {
    pub(crate) delegate: Arc<dyn BulkLeakCheckDelegate>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) transport: Arc<dyn LeakLookupTransport>,
    pub(crate) lookup_timeout: Duration,
    pub(crate) receiver: mpsc::UnboundedReceiver<LeakCheckCredential>,
    pub(crate) cancel: CancellationToken,
}

impl LeakCheckWorker {
    #[instrument(name = "leak_check_worker", skip_all)]
    pub(crate) async fn run(mut self) {
        let mut checked = 0usize;
        loop {
            let credential = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(checked, "Leak check worker cancelled");
                    break;
                }
                next = self.receiver.recv() => match next {
                    Some(credential) => credential,
                    None => break,
                },
            };

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(checked, "Leak check worker cancelled mid-lookup");
                    break;
                }
                outcome = self.check_one(&credential) => outcome,
            };
            if self.cancel.is_cancelled() {
                break;
            }

            match outcome {
                Ok(is_leaked) => {
                    checked += 1;
                    self.delegate.on_finished_credential(credential, is_leaked);
                }
                Err(failure) => {
                    log_failure(&failure);
                    self.delegate.on_error(failure.cause());
                    break;
                }
            }
        }
    }

    async fn check_one(
        &self,
        credential: &LeakCheckCredential,
    ) -> Result<IsLeaked, LeakDetectionFailure> {
        let token =
            self.identity.fetch_access_token().await.map_err(LeakDetectionFailure::token)?;
        let payload = build_lookup_payload(credential.username(), credential.password())?;

        let response = tokio::time::timeout(
            self.lookup_timeout,
            self.transport.lookup_single_leak(&token, &payload),
        )
        .await
        .map_err(|_| CommonError::timeout("lookup_single_leak", self.lookup_timeout))?
        .map_err(LeakDetectionFailure::lookup)?;

        Ok(IsLeaked(response.is_leaked))
    }
}

fn log_failure(failure: &LeakDetectionFailure) {
    let cause = failure.cause().label();
    let retryable = failure.is_retryable();
    match failure.severity() {
        ErrorSeverity::Critical | ErrorSeverity::Error => {
            error!(cause, retryable, error = %failure, "Leak lookup failed");
        }
        ErrorSeverity::Warning => warn!(cause, retryable, error = %failure, "Leak lookup failed"),
        ErrorSeverity::Info => info!(cause, retryable, error = %failure, "Leak lookup failed"),
    }
}
