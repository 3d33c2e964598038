//! Shared test helpers for `credwatch-core` integration tests.
//!
//! These helpers provide a scriptable leak check port and a recording
//! observer so the service tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod mocks;

use std::sync::Arc;

use credwatch_core::LeakCheckDependencies;
use credwatch_domain::LeakCheckCredential;

pub use mocks::{
    Event, MockCheckHandle, MockLeakCheckFactory, NoopIdentity, NoopTransport, RecordingObserver,
    SubmitBehavior,
};

/// Wire a mock factory into service dependencies
pub fn dependencies(factory: &Arc<MockLeakCheckFactory>) -> LeakCheckDependencies {
    LeakCheckDependencies {
        factory: factory.clone(),
        identity: Arc::new(NoopIdentity),
        transport: Arc::new(NoopTransport),
    }
}

/// `n` credentials with distinct usernames
pub fn credentials(n: usize) -> Vec<LeakCheckCredential> {
    (0..n).map(|i| LeakCheckCredential::new(format!("user{i}"), format!("password{i}"))).collect()
}
