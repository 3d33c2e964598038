//! Credential types submitted for leak checking
//!
//! A [`LeakCheckCredential`] is the unit of work for a bulk leak check. The
//! service only looks at its [`CredentialId`] to correlate results; the
//! username and password are consumed by the checker implementation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Stable identity of a submitted credential (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(Uuid);

impl CredentialId {
    /// Allocate a fresh, time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of checking a single credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsLeaked(pub bool);

impl IsLeaked {
    pub fn is_leaked(self) -> bool {
        self.0
    }
}

impl From<bool> for IsLeaked {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// A stored password entry as seen by the settings surface
///
/// Several saved entries may collapse onto the same leak check credential
/// once the username is canonicalized. The password is never serialized and
/// is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCredential {
    /// Site the entry belongs to
    pub signon_realm: String,
    /// Username as saved, before canonicalization
    pub username: String,
    #[serde(skip)]
    pub password: Zeroizing<String>,
}

impl SavedCredential {
    pub fn new(
        signon_realm: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            signon_realm: signon_realm.into(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for SavedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedCredential")
            .field("signon_realm", &self.signon_realm)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A username/password pair submitted to a bulk leak check
///
/// Cloning keeps the identity, so a clone resolves the same pending entry.
/// The password is wiped from memory on drop.
#[derive(Clone)]
pub struct LeakCheckCredential {
    id: CredentialId,
    username: String,
    password: Zeroizing<String>,
    saved_credentials: Vec<SavedCredential>,
}

impl LeakCheckCredential {
    /// Create a credential with a fresh identity
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: CredentialId::new(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
            saved_credentials: Vec::new(),
        }
    }

    /// Attach the saved entries this credential was derived from
    pub fn with_saved_credentials(mut self, saved: Vec<SavedCredential>) -> Self {
        self.saved_credentials = saved;
        self
    }

    pub fn id(&self) -> CredentialId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Saved entries that map onto this credential (empty when submitted
    /// directly)
    pub fn saved_credentials(&self) -> &[SavedCredential] {
        &self.saved_credentials
    }
}

impl fmt::Debug for LeakCheckCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeakCheckCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("saved_credentials", &self.saved_credentials.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_keeps_identity() {
        let credential = LeakCheckCredential::new("user", "password123");
        let copy = credential.clone();
        assert_eq!(credential.id(), copy.id());
        assert_eq!(copy.username(), "user");
        assert_eq!(copy.password(), "password123");
    }

    #[test]
    fn new_credentials_get_distinct_ids() {
        let a = LeakCheckCredential::new("user", "password123");
        let b = LeakCheckCredential::new("user", "password123");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let credential = LeakCheckCredential::new("user", "hunter2")
            .with_saved_credentials(vec![SavedCredential::new("https://a.com", "user", "hunter2")]);
        let rendered = format!("{credential:?} {:?}", credential.saved_credentials()[0]);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn saved_credential_serialization_omits_password() {
        let saved = SavedCredential::new("https://a.com", "user", "hunter2");
        let json = serde_json::to_string(&saved).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("password"));

        let restored: SavedCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.username, "user");
        assert!(restored.password.is_empty());
    }

    #[test]
    fn is_leaked_serializes_as_bool() {
        assert_eq!(serde_json::to_string(&IsLeaked(true)).unwrap(), "true");
        assert!(IsLeaked::from(true).is_leaked());
    }
}
