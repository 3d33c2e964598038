//! Leak check metrics collected from service notifications
//!
//! ## Design
//! - **Relaxed ordering** for independent counters
//! - **No locking needed** - simple atomic counters
//! - **MetricsResult returns** for future extensibility (currently always Ok)

use std::sync::atomic::{AtomicU64, Ordering};

use credwatch_core::BulkLeakCheckObserver;
use credwatch_domain::{BulkLeakCheckState, IsLeaked, LeakCheckCredential};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::observability::{MetricsError, MetricsResult};

/// Counters for a bulk leak check service
///
/// Register it as an observer to have it updated automatically.
#[derive(Debug, Default)]
pub struct LeakCheckMetrics {
    state_notifications: AtomicU64,
    results: AtomicU64,
    leaks_found: AtomicU64,
    signed_out: AtomicU64,
    token_request_failures: AtomicU64,
    hashing_failures: AtomicU64,
    service_errors: AtomicU64,
    network_errors: AtomicU64,
    last_pending_count: AtomicU64,
}

/// Per-state error counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakCheckErrorCounts {
    pub signed_out: u64,
    pub token_request_failure: u64,
    pub hashing_failure: u64,
    pub service_error: u64,
    pub network_error: u64,
}

impl LeakCheckErrorCounts {
    pub fn total(&self) -> u64 {
        self.signed_out
            + self.token_request_failure
            + self.hashing_failure
            + self.service_error
            + self.network_error
    }
}

/// Point-in-time copy of [`LeakCheckMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakCheckStats {
    pub state_notifications: u64,
    pub results: u64,
    pub leaks_found: u64,
    pub errors: LeakCheckErrorCounts,
    pub last_pending_count: u64,
}

impl LeakCheckMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a state notification
    ///
    /// Currently always succeeds.
    pub fn record_state(&self, state: BulkLeakCheckState, pending: usize) -> MetricsResult<()> {
        self.state_notifications.fetch_add(1, Ordering::Relaxed);
        self.last_pending_count.store(pending as u64, Ordering::Relaxed);

        let counter = match state {
            BulkLeakCheckState::Idle | BulkLeakCheckState::Running => return Ok(()),
            BulkLeakCheckState::SignedOut => &self.signed_out,
            BulkLeakCheckState::TokenRequestFailure => &self.token_request_failures,
            BulkLeakCheckState::HashingFailure => &self.hashing_failures,
            BulkLeakCheckState::ServiceError => &self.service_errors,
            BulkLeakCheckState::NetworkError => &self.network_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Record one credential result
    ///
    /// Currently always succeeds.
    pub fn record_result(&self, is_leaked: IsLeaked) -> MetricsResult<()> {
        self.results.fetch_add(1, Ordering::Relaxed);
        if is_leaked.is_leaked() {
            self.leaks_found.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Share of checked credentials found leaked, as a percentage
    ///
    /// # Errors
    /// Returns [`MetricsError::EmptyData`] before any result was recorded.
    pub fn leak_rate(&self) -> MetricsResult<f64> {
        let results = self.results.load(Ordering::Relaxed);
        if results == 0 {
            return Err(MetricsError::EmptyData { metric: "leak_rate" });
        }
        let leaks = self.leaks_found.load(Ordering::Relaxed);
        Ok((leaks as f64 / results as f64) * 100.0)
    }

    pub fn snapshot(&self) -> LeakCheckStats {
        LeakCheckStats {
            state_notifications: self.state_notifications.load(Ordering::Relaxed),
            results: self.results.load(Ordering::Relaxed),
            leaks_found: self.leaks_found.load(Ordering::Relaxed),
            errors: LeakCheckErrorCounts {
                signed_out: self.signed_out.load(Ordering::Relaxed),
                token_request_failure: self.token_request_failures.load(Ordering::Relaxed),
                hashing_failure: self.hashing_failures.load(Ordering::Relaxed),
                service_error: self.service_errors.load(Ordering::Relaxed),
                network_error: self.network_errors.load(Ordering::Relaxed),
            },
            last_pending_count: self.last_pending_count.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.state_notifications,
            &self.results,
            &self.leaks_found,
            &self.signed_out,
            &self.token_request_failures,
            &self.hashing_failures,
            &self.service_errors,
            &self.network_errors,
            &self.last_pending_count,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl BulkLeakCheckObserver for LeakCheckMetrics {
    fn on_state_changed(&self, state: BulkLeakCheckState, pending_checks: usize) {
        log_metric(self.record_state(state, pending_checks), "leak_check.state");
    }

    fn on_result_found(&self, _credential: &LeakCheckCredential, is_leaked: IsLeaked) {
        log_metric(self.record_result(is_leaked), "leak_check.result");
    }
}

fn log_metric(result: MetricsResult<()>, metric: &'static str) {
    if let Err(err) = result {
        warn!(metric = metric, error = ?err, "Failed to record leak check metric");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let metrics = LeakCheckMetrics::new();
        assert_eq!(metrics.snapshot(), LeakCheckStats::default());
        assert!(matches!(metrics.leak_rate(), Err(MetricsError::EmptyData { .. })));
    }

    #[test]
    fn test_error_states_counted_per_state() {
        let metrics = LeakCheckMetrics::new();
        metrics.record_state(BulkLeakCheckState::Running, 4).unwrap();
        metrics.record_state(BulkLeakCheckState::NetworkError, 0).unwrap();
        metrics.record_state(BulkLeakCheckState::NetworkError, 0).unwrap();
        metrics.record_state(BulkLeakCheckState::SignedOut, 0).unwrap();

        let stats = metrics.snapshot();
        assert_eq!(stats.state_notifications, 4);
        assert_eq!(stats.errors.network_error, 2);
        assert_eq!(stats.errors.signed_out, 1);
        assert_eq!(stats.errors.total(), 3);
        assert_eq!(stats.last_pending_count, 0);
    }

    #[test]
    fn test_leak_rate() {
        let metrics = LeakCheckMetrics::new();
        metrics.record_result(IsLeaked(true)).unwrap();
        for _ in 0..3 {
            metrics.record_result(IsLeaked(false)).unwrap();
        }

        let rate = metrics.leak_rate().unwrap();
        assert!((rate - 25.0).abs() < 0.01);
        assert_eq!(metrics.snapshot().leaks_found, 1);
    }

    #[test]
    fn test_observer_updates_counters() {
        let metrics = LeakCheckMetrics::new();
        let credential = LeakCheckCredential::new("user", "pw");
        metrics.on_state_changed(BulkLeakCheckState::Running, 2);
        metrics.on_result_found(&credential, IsLeaked(false));

        let stats = metrics.snapshot();
        assert_eq!(stats.results, 1);
        assert_eq!(stats.last_pending_count, 2);
    }

    #[test]
    fn test_reset() {
        let metrics = LeakCheckMetrics::new();
        metrics.record_state(BulkLeakCheckState::HashingFailure, 0).unwrap();
        metrics.record_result(IsLeaked(true)).unwrap();
        metrics.reset();
        assert_eq!(metrics.snapshot(), LeakCheckStats::default());
    }

    #[test]
    fn test_stats_serialize() {
        let json = serde_json::to_value(LeakCheckStats::default()).unwrap();
        assert_eq!(json["errors"]["network_error"], 0);
    }
}
