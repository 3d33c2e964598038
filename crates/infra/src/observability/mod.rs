//! Observability infrastructure for metrics and logging
//!
//! - [`logging::init_tracing`] installs the global `tracing` subscriber
//! - [`logging::LoggingObserver`] logs every service notification
//! - [`metrics::LeakCheckMetrics`] counts notifications with atomics
//!
//! ## Error Handling
//!
//! Record methods return `MetricsResult<()>` and currently always succeed.
//! Callers log and drop failures instead of propagating them:
//!
//! ```rust
//! use credwatch_domain::BulkLeakCheckState;
//! use credwatch_infra::observability::metrics::LeakCheckMetrics;
//!
//! let metrics = LeakCheckMetrics::new();
//! if let Err(e) = metrics.record_state(BulkLeakCheckState::Running, 3) {
//!     tracing::warn!("Failed to record metric: {}", e);
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, LoggingObserver};

/// Metrics error type
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Empty data set - cannot calculate aggregate metric
    #[error("Empty data: cannot calculate {metric}")]
    EmptyData {
        /// Metric name that failed (e.g., "leak_rate")
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
