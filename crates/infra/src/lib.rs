//! # CredWatch Infrastructure
//!
//! Infrastructure implementations of the ports defined in `credwatch-core`.
//!
//! This crate contains:
//! - A tokio-backed bulk leak check and its factory
//! - Credential hashing for lookup payloads
//! - In-memory lookup and static identity adapters
//! - Configuration loading, tracing setup and metrics
//!
//! ## Architecture
//! - Implements traits defined in `credwatch-core`
//! - Depends on `credwatch-common` and `credwatch-domain`
//! - Contains all "impure" code (I/O, runtime, global subscribers)

pub mod config;
pub mod identity;
pub mod leak_detection;
pub mod observability;

// Re-export commonly used items
pub use identity::StaticIdentityProvider;
pub use leak_detection::{
    build_lookup_payload, BulkLeakCheckImpl, InMemoryLeakLookup, LeakDetectionCheckFactoryImpl,
    LeakDetectionFailure,
};
pub use observability::metrics::{LeakCheckMetrics, LeakCheckStats};
pub use observability::{init_tracing, LoggingObserver};
