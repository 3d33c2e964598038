//! Settings-facing adapter over the bulk leak check service
//!
//! Saved passwords are de-duplicated by canonical username and password
//! before submission, so each distinct account/password pair is looked up
//! once. The resulting credential carries every saved entry it stands for.

use std::sync::Arc;

use credwatch_domain::{BulkLeakCheckState, LeakCheckCredential, SavedCredential};
use tracing::debug;

use super::ports::SavedPasswordsProvider;
use super::service::BulkLeakCheckService;
use crate::utils::canonicalize::canonicalize_username;

/// Runs leak checks over the user's saved passwords
pub struct BulkLeakCheckServiceAdapter {
    service: BulkLeakCheckService,
    provider: Arc<dyn SavedPasswordsProvider>,
}

impl BulkLeakCheckServiceAdapter {
    /// Wrap `service`, reading saved passwords from `provider`
    pub fn new(service: BulkLeakCheckService, provider: Arc<dyn SavedPasswordsProvider>) -> Self {
        Self { service, provider }
    }

    /// Check every saved password
    ///
    /// Returns `false` without doing anything while a check is already
    /// running.
    pub fn start_bulk_leak_check(&self) -> bool {
        if self.service.state() == BulkLeakCheckState::Running {
            return false;
        }

        let mut entries: Vec<(String, SavedCredential)> = self
            .provider
            .saved_passwords()
            .into_iter()
            .map(|saved| (canonicalize_username(&saved.username), saved))
            .collect();
        entries.sort_by(|(a_user, a), (b_user, b)| {
            (a_user, a.password.as_str()).cmp(&(b_user, b.password.as_str()))
        });

        // Equal (username, password) runs are adjacent after the sort.
        let mut credentials: Vec<LeakCheckCredential> = Vec::new();
        let mut entries = entries.into_iter().peekable();
        while let Some((username, first)) = entries.next() {
            let mut saved = vec![first];
            while let Some((_, next)) = entries
                .next_if(|(user, next)| *user == username && next.password == saved[0].password)
            {
                saved.push(next);
            }
            let credential = LeakCheckCredential::new(username, saved[0].password.as_str())
                .with_saved_credentials(saved);
            credentials.push(credential);
        }

        debug!(credentials = credentials.len(), "Starting bulk leak check for saved passwords");
        self.service.check_credentials(credentials);
        true
    }

    /// Cancel the running check, if any
    pub fn stop_bulk_leak_check(&self) {
        self.service.cancel();
    }

    /// Current state of the underlying service
    pub fn bulk_leak_check_state(&self) -> BulkLeakCheckState {
        self.service.state()
    }

    /// Credentials still awaiting a result
    pub fn pending_checks_count(&self) -> usize {
        self.service.pending_checks_count()
    }

    /// Check a single entry after the user edited it
    ///
    /// Joins a running check if there is one.
    pub fn on_edited(&self, saved: &SavedCredential) {
        let credential = LeakCheckCredential::new(saved.username.clone(), saved.password.as_str())
            .with_saved_credentials(vec![saved.clone()]);
        self.service.check_credentials(vec![credential]);
    }
}
