//! Domain types and models

pub mod credential;
pub mod leak_check;
pub mod lookup;

pub use credential::{CredentialId, IsLeaked, LeakCheckCredential, SavedCredential};
pub use leak_check::{BulkLeakCheckState, LeakDetectionError};
pub use lookup::{AccessToken, LookupSingleLeakPayload, LookupSingleLeakResponse};
