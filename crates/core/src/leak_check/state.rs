//! Authoritative state of the bulk leak check service
//!
//! [`CheckStateMachine`] owns the single in-flight operation handle together
//! with the multiset of credentials still pending in it. `Running` holds
//! exactly while a handle is present.
//!
//! Every change to the observable `(state, pending)` pair bumps an epoch
//! counter. Callers compare epochs to detect transitions made re-entrantly
//! while they were notifying observers.

use std::collections::HashMap;
use std::fmt;

use credwatch_domain::{BulkLeakCheckState, CredentialId};

/// Identity of one operation; late callbacks are matched against it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(u64);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

/// Outcome of resolving one credential
#[derive(Debug)]
pub enum Resolution<H> {
    /// The callback belongs to an operation that is no longer active
    Stale,
    /// The credential is not pending in the active operation
    Unknown,
    /// Credentials remain pending
    Pending { remaining: usize },
    /// Last credential resolved; state is now `Idle` and the handle released
    Completed(H),
}

struct ActiveOperation<H> {
    id: OperationId,
    handle: H,
    pending: HashMap<CredentialId, usize>,
    pending_total: usize,
}

impl<H> ActiveOperation<H> {
    fn add(&mut self, ids: &[CredentialId]) {
        for id in ids {
            *self.pending.entry(*id).or_insert(0) += 1;
        }
        self.pending_total += ids.len();
    }

    /// Returns false when `id` is not pending
    fn take(&mut self, id: CredentialId) -> bool {
        let Some(count) = self.pending.get_mut(&id) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.pending.remove(&id);
        }
        self.pending_total -= 1;
        true
    }
}

pub struct CheckStateMachine<H> {
    state: BulkLeakCheckState,
    active: Option<ActiveOperation<H>>,
    next_operation: u64,
    epoch: u64,
}

impl<H> CheckStateMachine<H> {
    pub fn new() -> Self {
        Self { state: BulkLeakCheckState::Idle, active: None, next_operation: 1, epoch: 0 }
    }

    pub fn state(&self) -> BulkLeakCheckState {
        self.state
    }

    /// Credentials submitted to the active operation and not yet resolved
    pub fn pending_count(&self) -> usize {
        self.active.as_ref().map_or(0, |op| op.pending_total)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_operation(&self) -> Option<OperationId> {
        self.active.as_ref().map(|op| op.id)
    }

    pub fn active_handle(&self) -> Option<(OperationId, &H)> {
        self.active.as_ref().map(|op| (op.id, &op.handle))
    }

    /// Allocate the id for an operation about to be created
    pub fn reserve_operation(&mut self) -> OperationId {
        let id = OperationId(self.next_operation);
        self.next_operation += 1;
        id
    }

    /// `Idle`/error -> `Running` with a fresh operation
    pub fn start(&mut self, id: OperationId, handle: H, credentials: &[CredentialId]) {
        debug_assert!(self.active.is_none(), "operation already running");
        let mut operation =
            ActiveOperation { id, handle, pending: HashMap::new(), pending_total: 0 };
        operation.add(credentials);
        self.active = Some(operation);
        self.state = BulkLeakCheckState::Running;
        self.epoch += 1;
    }

    /// Coalesce more credentials into the active operation
    ///
    /// Returns the new pending count, or `None` when nothing is running.
    pub fn extend(&mut self, credentials: &[CredentialId]) -> Option<usize> {
        let operation = self.active.as_mut()?;
        operation.add(credentials);
        self.epoch += 1;
        Some(operation.pending_total)
    }

    /// Record the result for one credential of operation `id`
    pub fn resolve(&mut self, id: OperationId, credential: CredentialId) -> Resolution<H> {
        let Some(operation) = self.active.as_mut().filter(|op| op.id == id) else {
            return Resolution::Stale;
        };
        if !operation.take(credential) {
            return Resolution::Unknown;
        }
        self.epoch += 1;
        if operation.pending_total > 0 {
            return Resolution::Pending { remaining: operation.pending_total };
        }
        match self.active.take() {
            Some(finished) => {
                self.state = BulkLeakCheckState::Idle;
                Resolution::Completed(finished.handle)
            }
            None => Resolution::Stale,
        }
    }

    /// `Running` -> error state for operation `id`
    ///
    /// Returns the released handle, or `None` if `id` is not active.
    pub fn fail(&mut self, id: OperationId, state: BulkLeakCheckState) -> Option<H> {
        debug_assert!(state.is_error());
        if self.active_operation() != Some(id) {
            return None;
        }
        let operation = self.active.take()?;
        self.state = state;
        self.epoch += 1;
        Some(operation.handle)
    }

    /// Enter an error state without an operation (start refused)
    pub fn refuse(&mut self, state: BulkLeakCheckState) {
        debug_assert!(state.is_error());
        debug_assert!(self.active.is_none());
        self.state = state;
        self.epoch += 1;
    }

    /// Any state -> `Idle`, releasing the active handle if there is one
    pub fn cancel(&mut self) -> Option<H> {
        let operation = self.active.take()?;
        self.state = BulkLeakCheckState::Idle;
        self.epoch += 1;
        Some(operation.handle)
    }
}

impl<H> Default for CheckStateMachine<H> {
    fn default() -> Self {
        Self::new()
    }
}
