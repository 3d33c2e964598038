//! # CredWatch Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The bulk leak check service and its state machine
//! - Port/adapter interfaces (traits)
//! - Username canonicalization
//!
//! ## Architecture Principles
//! - The only internal dependency is `credwatch-domain`
//! - External crates are limited to `parking_lot` (locks), `tracing`
//!   (logging) and `async-trait` (async port traits)
//! - No network, storage, or runtime code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod leak_check;
pub mod utils;

// Re-export specific items to avoid ambiguity
pub use leak_check::ports::{
    BulkLeakCheck, BulkLeakCheckDelegate, BulkLeakCheckObserver, IdentityProvider,
    LeakDetectionCheckFactory, LeakLookupTransport, SavedPasswordsProvider,
};
pub use leak_check::{BulkLeakCheckService, BulkLeakCheckServiceAdapter, LeakCheckDependencies};
// Re-export utilities
pub use utils::canonicalize::canonicalize_username;
