//! Factory for the tokio-backed bulk leak check

use std::sync::Arc;
use std::time::Duration;

use credwatch_core::{
    BulkLeakCheck, BulkLeakCheckDelegate, IdentityProvider, LeakDetectionCheckFactory,
    LeakLookupTransport,
};
use credwatch_domain::{CredWatchError, LeakCheckConfig, LeakDetectionError, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::bulk_check::{BulkLeakCheckImpl, LeakCheckWorker};

/// Spawns one worker task per operation on the given runtime
pub struct LeakDetectionCheckFactoryImpl {
    runtime: Handle,
    lookup_timeout: Duration,
}

impl LeakDetectionCheckFactoryImpl {
    pub fn new(runtime: Handle, config: &LeakCheckConfig) -> Self {
        Self { runtime, lookup_timeout: config.lookup_timeout() }
    }

    /// Use the runtime the caller is running on
    ///
    /// # Errors
    /// Returns `CredWatchError::Internal` outside a tokio runtime.
    pub fn from_current(config: &LeakCheckConfig) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| CredWatchError::Internal(format!("No tokio runtime available: {e}")))?;
        Ok(Self::new(runtime, config))
    }
}

impl LeakDetectionCheckFactory for LeakDetectionCheckFactoryImpl {
    #[instrument(skip_all)]
    fn try_create_bulk_leak_check(
        &self,
        delegate: Arc<dyn BulkLeakCheckDelegate>,
        identity: Arc<dyn IdentityProvider>,
        transport: Arc<dyn LeakLookupTransport>,
    ) -> std::result::Result<Box<dyn BulkLeakCheck>, LeakDetectionError> {
        if identity.primary_account().is_none() {
            debug!("Refusing leak check without a signed-in account");
            return Err(LeakDetectionError::NotSignedIn);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();
        let worker = LeakCheckWorker {
            delegate,
            identity,
            transport,
            lookup_timeout: self.lookup_timeout,
            receiver,
            cancel: cancellation_token.clone(),
        };
        self.runtime.spawn(worker.run());

        Ok(Box::new(BulkLeakCheckImpl::new(sender, cancellation_token)))
    }
}
