use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::NewRefreshToken;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::UserCredentials;
use crate::session::errors::SessionError;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::UserRepository;

/// User store kept in process memory, keyed by email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<EmailAddress, UserCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub async fn insert(&self, user: UserCredentials) {
        self.users.write().await.insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, SessionError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

/// Refresh token store kept in process memory, keyed by token value.
///
/// Each operation holds the lock for its whole duration, so revocation is atomic.
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, revoked ones included.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, token: NewRefreshToken) -> Result<RefreshToken, SessionError> {
        let now = Utc::now();
        let row = RefreshToken {
            token: token.token,
            user_id: token.user_id,
            created_at: now,
            updated_at: now,
            expires_at: token.expires_at,
            revoked_at: None,
        };

        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&row.token) {
            return Err(SessionError::StoreUnavailable(
                "duplicate refresh token".to_string(),
            ));
        }
        tokens.insert(row.token.clone(), row.clone());

        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn revoke(&self, token: &str) -> Result<RefreshToken, SessionError> {
        let mut tokens = self.tokens.write().await;
        let row = tokens
            .get_mut(token)
            .ok_or(SessionError::RefreshTokenNotFound)?;

        let now = Utc::now();
        row.revoked_at.get_or_insert(now);
        row.updated_at = now;

        Ok(row.clone())
    }
}
