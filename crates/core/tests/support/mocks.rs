use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use credwatch_core::{
    BulkLeakCheck, BulkLeakCheckDelegate, BulkLeakCheckObserver, IdentityProvider,
    LeakDetectionCheckFactory, LeakLookupTransport,
};
use credwatch_domain::{
    AccessToken, BulkLeakCheckState, CredWatchError, CredentialId, IsLeaked, LeakCheckCredential,
    LeakDetectionError, LookupSingleLeakPayload, LookupSingleLeakResponse, Result as DomainResult,
};

/// What a mock check does when credentials are submitted to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBehavior {
    /// Record only; the test drives callbacks through [`MockCheckHandle`]
    Record,
    /// Resolve the credentials of this submit synchronously
    ResolveAll(bool),
    /// Resolve everything submitted to the check so far, synchronously
    DrainAll(bool),
    /// Report an error synchronously
    Fail(LeakDetectionError),
}

struct CheckShared {
    delegate: Arc<dyn BulkLeakCheckDelegate>,
    behavior: Mutex<SubmitBehavior>,
    submitted: Mutex<Vec<LeakCheckCredential>>,
    cancelled: AtomicBool,
}

/// Test-side view of a check created by [`MockLeakCheckFactory`]
#[derive(Clone)]
pub struct MockCheckHandle {
    shared: Arc<CheckShared>,
}

impl MockCheckHandle {
    pub fn submitted(&self) -> Vec<LeakCheckCredential> {
        self.shared.submitted.lock().unwrap().clone()
    }

    /// Behaviour for the next submits to this check
    pub fn set_behavior(&self, behavior: SubmitBehavior) {
        *self.shared.behavior.lock().unwrap() = behavior;
    }

    pub fn was_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Report a result as the port would
    pub fn finish(&self, credential: &LeakCheckCredential, leaked: bool) {
        self.shared.delegate.on_finished_credential(credential.clone(), IsLeaked(leaked));
    }

    /// Report a terminal error as the port would
    pub fn fail(&self, error: LeakDetectionError) {
        self.shared.delegate.on_error(error);
    }
}

struct MockBulkLeakCheck {
    shared: Arc<CheckShared>,
}

impl BulkLeakCheck for MockBulkLeakCheck {
    fn check_credentials(&self, credentials: Vec<LeakCheckCredential>) {
        self.shared.submitted.lock().unwrap().extend(credentials.iter().cloned());
        let behavior = *self.shared.behavior.lock().unwrap();
        match behavior {
            SubmitBehavior::Record => {}
            SubmitBehavior::ResolveAll(leaked) => {
                for credential in credentials {
                    self.shared.delegate.on_finished_credential(credential, IsLeaked(leaked));
                }
            }
            SubmitBehavior::DrainAll(leaked) => {
                let submitted = self.shared.submitted.lock().unwrap().clone();
                for credential in submitted {
                    self.shared.delegate.on_finished_credential(credential, IsLeaked(leaked));
                }
            }
            SubmitBehavior::Fail(error) => self.shared.delegate.on_error(error),
        }
    }

    fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Factory creating scriptable checks, or refusing with a fixed cause
pub struct MockLeakCheckFactory {
    refusal: Option<LeakDetectionError>,
    error_during_create: Option<LeakDetectionError>,
    behavior: SubmitBehavior,
    created: Mutex<Vec<MockCheckHandle>>,
    calls: AtomicUsize,
}

impl MockLeakCheckFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(None, None, SubmitBehavior::Record))
    }

    pub fn refusing(error: LeakDetectionError) -> Arc<Self> {
        Arc::new(Self::build(Some(error), None, SubmitBehavior::Record))
    }

    pub fn with_behavior(behavior: SubmitBehavior) -> Arc<Self> {
        Arc::new(Self::build(None, None, behavior))
    }

    /// Calls `on_error` on the delegate before returning the check
    pub fn erroring_during_create(error: LeakDetectionError) -> Arc<Self> {
        Arc::new(Self::build(None, Some(error), SubmitBehavior::Record))
    }

    fn build(
        refusal: Option<LeakDetectionError>,
        error_during_create: Option<LeakDetectionError>,
        behavior: SubmitBehavior,
    ) -> Self {
        Self {
            refusal,
            error_during_create,
            behavior,
            created: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<MockCheckHandle> {
        self.created.lock().unwrap().clone()
    }

    pub fn last(&self) -> MockCheckHandle {
        self.created.lock().unwrap().last().cloned().expect("no check created")
    }
}

impl LeakDetectionCheckFactory for MockLeakCheckFactory {
    fn try_create_bulk_leak_check(
        &self,
        delegate: Arc<dyn BulkLeakCheckDelegate>,
        _identity: Arc<dyn IdentityProvider>,
        _transport: Arc<dyn LeakLookupTransport>,
    ) -> Result<Box<dyn BulkLeakCheck>, LeakDetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.refusal {
            return Err(error);
        }
        if let Some(error) = self.error_during_create {
            delegate.on_error(error);
        }

        let shared = Arc::new(CheckShared {
            delegate,
            behavior: Mutex::new(self.behavior),
            submitted: Mutex::new(Vec::new()),
            cancelled: AtomicBool::new(false),
        });
        self.created.lock().unwrap().push(MockCheckHandle { shared: shared.clone() });
        Ok(Box::new(MockBulkLeakCheck { shared }))
    }
}

pub struct NoopIdentity;

#[async_trait]
impl IdentityProvider for NoopIdentity {
    fn primary_account(&self) -> Option<String> {
        Some("test@example.com".to_string())
    }

    async fn fetch_access_token(&self) -> DomainResult<AccessToken> {
        Ok(AccessToken::new("token"))
    }
}

pub struct NoopTransport;

#[async_trait]
impl LeakLookupTransport for NoopTransport {
    async fn lookup_single_leak(
        &self,
        _token: &AccessToken,
        _payload: &LookupSingleLeakPayload,
    ) -> DomainResult<LookupSingleLeakResponse> {
        Err(CredWatchError::Internal("not used by core tests".into()))
    }
}

/// Observer notification as recorded by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    State(BulkLeakCheckState, usize),
    Result(CredentialId, bool),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<(BulkLeakCheckState, usize)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::State(state, pending) => Some((state, pending)),
                Event::Result(..) => None,
            })
            .collect()
    }

    pub fn results(&self) -> Vec<(CredentialId, bool)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Result(id, leaked) => Some((id, leaked)),
                Event::State(..) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl BulkLeakCheckObserver for RecordingObserver {
    fn on_state_changed(&self, state: BulkLeakCheckState, pending_checks: usize) {
        self.events.lock().unwrap().push(Event::State(state, pending_checks));
    }

    fn on_result_found(&self, credential: &LeakCheckCredential, is_leaked: IsLeaked) {
        self.events.lock().unwrap().push(Event::Result(credential.id(), is_leaked.is_leaked()));
    }
}
