//! Request and response types exchanged with a leak lookup backend
//!
//! These are local representations. How they travel over the wire is up to
//! the transport implementation.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Hashed form of a credential ready for lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupSingleLeakPayload {
    /// Hex prefix of the canonical username hash, used for bucketing
    pub username_hash_prefix: String,
    /// Hex digest over canonical username and password
    pub credential_digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSingleLeakResponse {
    pub is_leaked: bool,
}

/// Bearer token for the lookup backend
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn secret(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("ya29.secret");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
        assert_eq!(token.secret(), "ya29.secret");
    }
}
