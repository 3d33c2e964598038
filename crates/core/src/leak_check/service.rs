//! Bulk leak check service - core business logic
//!
//! Coalesces every submission into a single in-flight operation, tracks the
//! authoritative [`BulkLeakCheckState`], and fans results out to observers.
//!
//! Public entry points and operation callbacks are serialized by a reentrant
//! sequencer, so callbacks arriving on worker threads interleave with caller
//! requests one at a time while observers may still call back into the
//! service from inside a notification. The state lock is never held while
//! the port or an observer runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use credwatch_domain::{
    BulkLeakCheckState, CredentialId, IsLeaked, LeakCheckConfig, LeakCheckCredential,
    LeakDetectionError,
};
use parking_lot::{Mutex, ReentrantMutex};
use tracing::{debug, info, warn};

use super::classifier::classify;
use super::observers::ObserverList;
use super::ports::{
    BulkLeakCheck, BulkLeakCheckDelegate, BulkLeakCheckObserver, IdentityProvider,
    LeakDetectionCheckFactory, LeakLookupTransport,
};
use super::state::{CheckStateMachine, OperationId, Resolution};

type OperationHandle = Arc<dyn BulkLeakCheck>;

/// Collaborators the service needs to start operations
///
/// Held until [`BulkLeakCheckService::shutdown`].
#[derive(Clone)]
pub struct LeakCheckDependencies {
    /// Creates the per-operation check
    pub factory: Arc<dyn LeakDetectionCheckFactory>,
    /// Account and access tokens handed to each check
    pub identity: Arc<dyn IdentityProvider>,
    /// Lookup backend handed to each check
    pub transport: Arc<dyn LeakLookupTransport>,
}

/// Batched leak check service
///
/// Cheap to clone; clones share the same state and observers.
#[derive(Clone)]
pub struct BulkLeakCheckService {
    inner: Arc<Inner>,
}

struct Inner {
    sequencer: ReentrantMutex<()>,
    machine: Mutex<CheckStateMachine<OperationHandle>>,
    observers: ObserverList<dyn BulkLeakCheckObserver>,
    dependencies: Mutex<Option<LeakCheckDependencies>>,
    notify_progress: bool,
    shut_down: AtomicBool,
}

impl BulkLeakCheckService {
    /// Create a service with default settings
    pub fn new(dependencies: LeakCheckDependencies) -> Self {
        Self::with_config(dependencies, &LeakCheckConfig::default())
    }

    /// Create a service; `config.notify_progress` adds a `Running`
    /// notification after every partial result
    pub fn with_config(dependencies: LeakCheckDependencies, config: &LeakCheckConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                sequencer: ReentrantMutex::new(()),
                machine: Mutex::new(CheckStateMachine::new()),
                observers: ObserverList::new(),
                dependencies: Mutex::new(Some(dependencies)),
                notify_progress: config.notify_progress,
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    /// Current state
    pub fn state(&self) -> BulkLeakCheckState {
        self.inner.machine.lock().state()
    }

    /// Credentials submitted to the running operation and not yet resolved
    pub fn pending_checks_count(&self) -> usize {
        self.inner.machine.lock().pending_count()
    }

    /// Register an observer; registering the same `Arc` twice is a no-op
    pub fn add_observer(&self, observer: Arc<dyn BulkLeakCheckObserver>) {
        self.inner.observers.add(observer);
    }

    /// Unregister an observer, matched by pointer identity
    pub fn remove_observer(&self, observer: &Arc<dyn BulkLeakCheckObserver>) {
        self.inner.observers.remove(observer);
    }

    /// Check `credentials` for leaks
    ///
    /// Joins the running operation if there is one, otherwise starts a new
    /// operation from whatever state the service is in. An empty batch is
    /// ignored.
    ///
    /// # Panics
    /// Panics when called after [`shutdown`](Self::shutdown).
    pub fn check_credentials(&self, credentials: Vec<LeakCheckCredential>) {
        assert!(
            !self.inner.shut_down.load(Ordering::Acquire),
            "check_credentials called after shutdown"
        );
        if credentials.is_empty() {
            return;
        }

        let _serial = self.inner.sequencer.lock();
        let ids: Vec<CredentialId> = credentials.iter().map(LeakCheckCredential::id).collect();

        let running = {
            let mut machine = self.inner.machine.lock();
            let handle = machine.active_handle().map(|(op, handle)| (op, Arc::clone(handle)));
            if handle.is_some() {
                machine.extend(&ids);
            }
            handle
        };

        match running {
            Some((operation, handle)) => {
                debug!(%operation, added = ids.len(), "Appending to running leak check");
                handle.check_credentials(credentials);
                self.inner.notify_if_running(operation);
            }
            None => self.start_operation(&ids, credentials),
        }
    }

    /// Stop the running operation and return to `Idle`
    ///
    /// Does nothing when no operation is running.
    pub fn cancel(&self) {
        let _serial = self.inner.sequencer.lock();
        let handle = {
            let mut machine = self.inner.machine.lock();
            let handle = machine.cancel();
            if handle.is_none() {
                debug_assert_ne!(machine.state(), BulkLeakCheckState::Running);
            }
            handle
        };
        let Some(handle) = handle else {
            return;
        };

        handle.cancel();
        info!("Bulk leak check cancelled");
        self.inner.notify_state_changed(BulkLeakCheckState::Idle, 0);
    }

    /// Tear the service down for good
    ///
    /// Observers are dropped without a final notification, the running
    /// operation is cancelled silently, and the port dependencies are
    /// released. Further calls to [`check_credentials`](Self::check_credentials)
    /// panic. Calling this more than once is harmless.
    pub fn shutdown(&self) {
        if self.inner.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        let _serial = self.inner.sequencer.lock();
        self.inner.observers.clear();

        let handle = self.inner.machine.lock().cancel();
        if let Some(handle) = handle {
            handle.cancel();
        }
        self.inner.dependencies.lock().take();
        info!("Bulk leak check service shut down");
    }

    fn start_operation(&self, ids: &[CredentialId], credentials: Vec<LeakCheckCredential>) {
        let Some(dependencies) = self.inner.dependencies.lock().clone() else {
            return;
        };
        let operation = self.inner.machine.lock().reserve_operation();
        let delegate: Arc<dyn BulkLeakCheckDelegate> =
            Arc::new(OperationDelegate { inner: Arc::downgrade(&self.inner), operation });

        let created = dependencies.factory.try_create_bulk_leak_check(
            delegate,
            dependencies.identity,
            dependencies.transport,
        );
        match created {
            Ok(check) => {
                let handle: OperationHandle = Arc::from(check);
                self.inner.machine.lock().start(operation, Arc::clone(&handle), ids);
                info!(%operation, credentials = ids.len(), "Bulk leak check started");

                handle.check_credentials(credentials);
                self.inner.notify_if_running(operation);
            }
            Err(error) => {
                let state = classify(error);
                self.inner.machine.lock().refuse(state);
                warn!(cause = error.label(), %state, "Bulk leak check could not start");
                self.inner.notify_state_changed(state, 0);
            }
        }
    }
}

impl Inner {
    fn notify_state_changed(&self, state: BulkLeakCheckState, pending: usize) {
        self.observers.for_each(|observer| observer.on_state_changed(state, pending));
    }

    fn notify_result_found(&self, credential: &LeakCheckCredential, is_leaked: IsLeaked) {
        self.observers.for_each(|observer| observer.on_result_found(credential, is_leaked));
    }

    /// Emit `(Running, pending)` if `operation` is still the active one
    fn notify_if_running(&self, operation: OperationId) {
        let pending = {
            let machine = self.machine.lock();
            if machine.active_operation() != Some(operation) {
                return;
            }
            machine.pending_count()
        };
        self.notify_state_changed(BulkLeakCheckState::Running, pending);
    }

    fn finish_credential(
        &self,
        operation: OperationId,
        credential: LeakCheckCredential,
        is_leaked: IsLeaked,
    ) {
        let _serial = self.sequencer.lock();
        let (resolution, epoch) = {
            let mut machine = self.machine.lock();
            let resolution = machine.resolve(operation, credential.id());
            (resolution, machine.epoch())
        };

        match resolution {
            Resolution::Stale => {
                debug!(
                    %operation,
                    credential = %credential.id(),
                    "Ignoring result for inactive operation"
                );
            }
            Resolution::Unknown => {
                warn!(
                    %operation,
                    credential = %credential.id(),
                    "Ignoring result for credential that is not pending"
                );
            }
            Resolution::Pending { remaining } => {
                debug!(%operation, remaining, leaked = is_leaked.is_leaked(), "Credential checked");
                self.notify_result_found(&credential, is_leaked);
                if self.notify_progress {
                    self.notify_if_running(operation);
                }
            }
            Resolution::Completed(handle) => {
                drop(handle);
                info!(%operation, leaked = is_leaked.is_leaked(), "Bulk leak check finished");
                self.notify_result_found(&credential, is_leaked);
                // An observer may have started or failed another operation meanwhile.
                if self.machine.lock().epoch() == epoch {
                    self.notify_state_changed(BulkLeakCheckState::Idle, 0);
                }
            }
        }
    }

    fn fail_operation(&self, operation: OperationId, error: LeakDetectionError) {
        let _serial = self.sequencer.lock();
        let state = classify(error);
        let Some(handle) = self.machine.lock().fail(operation, state) else {
            debug!(%operation, cause = error.label(), "Ignoring error for inactive operation");
            return;
        };
        drop(handle);
        warn!(%operation, cause = error.label(), %state, "Bulk leak check failed");
        self.notify_state_changed(state, 0);
    }
}

/// Delegate bound to a single operation
///
/// Holds only a weak reference so a port outliving the service cannot keep
/// it alive.
struct OperationDelegate {
    inner: Weak<Inner>,
    operation: OperationId,
}

impl BulkLeakCheckDelegate for OperationDelegate {
    fn on_finished_credential(&self, credential: LeakCheckCredential, is_leaked: IsLeaked) {
        if let Some(inner) = self.inner.upgrade() {
            inner.finish_credential(self.operation, credential, is_leaked);
        }
    }

    fn on_error(&self, error: LeakDetectionError) {
        if let Some(inner) = self.inner.upgrade() {
            inner.fail_operation(self.operation, error);
        }
    }
}
