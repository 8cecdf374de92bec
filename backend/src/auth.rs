//! Auth token resolution contract and its in-memory implementation.

use crate::error::SessionError;
use async_trait::async_trait;
use dashmap::DashMap;

/// Resolves an opaque auth token to a username.
///
/// The session core never inspects tokens itself; issuing, hashing and
/// expiring them belongs to the account service behind this trait.
#[async_trait]
pub trait AuthLookup: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<String, SessionError>;
}

/// Token table held in memory, for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryAuthStore {
    tokens: DashMap<String, String>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `username`. Multiple live tokens per user
    /// are allowed, matching one-token-per-login semantics.
    pub fn issue(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), username.to_string());
        token
    }

    pub fn revoke(&self, token: &str) {
        self.tokens.remove(token);
    }
}

#[async_trait]
impl AuthLookup for MemoryAuthStore {
    async fn resolve(&self, token: &str) -> Result<String, SessionError> {
        self.tokens
            .get(token)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issued_token_resolves_to_username() {
        let store = MemoryAuthStore::new();
        let token = store.issue("alice");
        assert_eq!(store.resolve(&token).await.expect("valid token"), "alice");
    }

    #[tokio::test]
    async fn test_unknown_token_is_authentication_error() {
        let store = MemoryAuthStore::new();
        assert!(matches!(
            store.resolve("nope").await,
            Err(SessionError::Authentication)
        ));
    }

    #[tokio::test]
    async fn test_revoked_token_stops_resolving() {
        let store = MemoryAuthStore::new();
        let token = store.issue("alice");
        store.revoke(&token);
        assert!(store.resolve(&token).await.is_err());
    }
}
