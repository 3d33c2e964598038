//! Builds lookup payloads from plaintext credentials
//!
//! Only hashes leave this module. The username is canonicalized first so
//! that equivalent accounts produce the same payload.

use credwatch_core::canonicalize_username;
use credwatch_domain::constants::{CREDENTIAL_DIGEST_SEPARATOR, USERNAME_HASH_PREFIX_BYTES};
use credwatch_domain::LookupSingleLeakPayload;
use sha2::{Digest, Sha256};

use super::errors::LeakDetectionFailure;

/// Hash `username` and `password` into a lookup payload
///
/// # Errors
/// Returns a validation failure (reported as a hashing failure) when the
/// canonical username or the password is empty.
pub fn build_lookup_payload(
    username: &str,
    password: &str,
) -> Result<LookupSingleLeakPayload, LeakDetectionFailure> {
    let canonical = canonicalize_username(username);
    if canonical.is_empty() {
        return Err(LeakDetectionFailure::hashing("username", "empty after canonicalization"));
    }
    if password.is_empty() {
        return Err(LeakDetectionFailure::hashing("password", "empty"));
    }

    let username_hash = Sha256::digest(canonical.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hasher.update([CREDENTIAL_DIGEST_SEPARATOR]);
    hasher.update(password.as_bytes());

    Ok(LookupSingleLeakPayload {
        username_hash_prefix: hex::encode(&username_hash[..USERNAME_HASH_PREFIX_BYTES]),
        credential_digest: hex::encode(hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use credwatch_domain::LeakDetectionError;

    use super::*;

    #[test]
    fn test_prefix_is_three_bytes_of_hex() {
        let payload = build_lookup_payload("alice", "hunter2").unwrap();
        assert_eq!(payload.username_hash_prefix.len(), 6);
        assert_eq!(payload.credential_digest.len(), 64);
        // sha256("alice") = 2bd806c9...
        assert_eq!(payload.username_hash_prefix, "2bd806");
    }

    #[test]
    fn test_equivalent_usernames_share_payload() {
        let a = build_lookup_payload("Alice@gmail.com", "hunter2").unwrap();
        let b = build_lookup_payload("alice", "hunter2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_password_changes_digest_only() {
        let a = build_lookup_payload("alice", "hunter2").unwrap();
        let b = build_lookup_payload("alice", "hunter3").unwrap();
        assert_eq!(a.username_hash_prefix, b.username_hash_prefix);
        assert_ne!(a.credential_digest, b.credential_digest);
    }

    #[test]
    fn test_separator_prevents_boundary_collisions() {
        let a = build_lookup_payload("ab", "c").unwrap();
        let b = build_lookup_payload("a", "bc").unwrap();
        assert_ne!(a.credential_digest, b.credential_digest);
    }

    #[test]
    fn test_empty_inputs_fail() {
        for (username, password) in [("", "pw"), ("@gmail.com", "pw"), ("alice", "")] {
            let err = build_lookup_payload(username, password).unwrap_err();
            assert_eq!(err.cause(), LeakDetectionError::HashingFailure, "{username:?}/{password:?}");
        }
    }
}
