//! Leak detection adapters
//!
//! A tokio-backed implementation of the bulk leak check port, the hashing it
//! relies on, and an in-memory lookup backend.

pub mod bulk_check;
pub mod errors;
pub mod factory;
pub mod hashing;
pub mod memory;

pub use bulk_check::BulkLeakCheckImpl;
pub use errors::LeakDetectionFailure;
pub use factory::LeakDetectionCheckFactoryImpl;
pub use hashing::build_lookup_payload;
pub use memory::InMemoryLeakLookup;
