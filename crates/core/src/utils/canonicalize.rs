//! Username canonicalization
//!
//! Two saved entries whose usernames canonicalize to the same string are the
//! same account for leak checking purposes, so they only need one lookup.
//!
//! # Examples
//!
//! ```
//! use credwatch_core::utils::canonicalize::canonicalize_username;
//!
//! assert_eq!(canonicalize_username("Alice@GMail.com"), "alice");
//! assert_eq!(canonicalize_username("bob@example.com."), "bob@example.com");
//! ```

const STRIPPED_DOMAINS: [&str; 2] = ["@gmail.com", "@googlemail.com"];

/// Canonical form of `username`
///
/// Lowercases ASCII letters, drops trailing dots, then removes a Gmail
/// domain suffix.
pub fn canonicalize_username(username: &str) -> String {
    let lowered = username.to_ascii_lowercase();
    let trimmed = lowered.trim_end_matches('.');
    STRIPPED_DOMAINS
        .iter()
        .find_map(|domain| trimmed.strip_suffix(domain))
        .unwrap_or(trimmed)
        .to_string()
}
