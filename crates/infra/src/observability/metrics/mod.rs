//! Metrics collection modules
//!
//! Thread-safe metrics for the leak check service.

pub mod leak_check;

// Re-export metric types for convenience
pub use leak_check::{LeakCheckErrorCounts, LeakCheckMetrics, LeakCheckStats};
