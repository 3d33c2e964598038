//! Fixed identity provider
//!
//! Serves a preconfigured account and token. Useful when the access token is
//! supplied out of band, and in tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use credwatch_core::IdentityProvider;
use credwatch_domain::{AccessToken, CredWatchError, Result};

#[derive(Debug)]
pub struct StaticIdentityProvider {
    account: Option<String>,
    token: std::result::Result<AccessToken, CredWatchError>,
    fetches: AtomicUsize,
}

impl StaticIdentityProvider {
    /// Signed in as `account`, handing out `token`
    pub fn signed_in(account: impl Into<String>, token: AccessToken) -> Self {
        Self { account: Some(account.into()), token: Ok(token), fetches: AtomicUsize::new(0) }
    }

    /// No account available
    pub fn signed_out() -> Self {
        Self {
            account: None,
            token: Err(CredWatchError::Auth("no signed-in account".into())),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Signed in, but every token request fails with `error`
    pub fn failing(account: impl Into<String>, error: CredWatchError) -> Self {
        Self { account: Some(account.into()), token: Err(error), fetches: AtomicUsize::new(0) }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn primary_account(&self) -> Option<String> {
        self.account.clone()
    }

    async fn fetch_access_token(&self) -> Result<AccessToken> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signed_in_hands_out_token() {
        let identity = StaticIdentityProvider::signed_in("me@example.com", AccessToken::new("t"));
        assert_eq!(identity.primary_account().as_deref(), Some("me@example.com"));
        assert_eq!(identity.fetch_access_token().await.unwrap().secret(), "t");
        assert_eq!(identity.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_has_no_account() {
        let identity = StaticIdentityProvider::signed_out();
        assert!(identity.primary_account().is_none());
        assert!(identity.fetch_access_token().await.is_err());
    }
}
