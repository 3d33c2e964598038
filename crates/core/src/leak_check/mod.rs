//! Bulk credential leak checking
//!
//! [`BulkLeakCheckService`] coordinates batched lookups through the ports in
//! [`ports`]; [`BulkLeakCheckServiceAdapter`] exposes it to a settings surface.

pub mod adapter;
pub mod classifier;
pub mod observers;
pub mod ports;
pub mod service;
pub mod state;

pub use adapter::BulkLeakCheckServiceAdapter;
pub use classifier::classify;
pub use observers::ObserverList;
pub use service::{BulkLeakCheckService, LeakCheckDependencies};
pub use state::{CheckStateMachine, OperationId, Resolution};
