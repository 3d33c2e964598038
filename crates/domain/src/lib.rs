//! # CredWatch Domain
//!
//! Data types shared by every CredWatch crate.
//!
//! This crate contains:
//! - Credentials submitted for leak checking and their identities
//! - Service state and failure cause enums
//! - Lookup payload types
//! - Configuration structures, constants and the domain error type
//!
//! ## Architecture
//! - No dependencies on other CredWatch crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
