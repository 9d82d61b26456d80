use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::config::AuthConfig;
use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::NewRefreshToken;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RevokeOutcome;
use crate::domain::session::models::SessionSettings;
use crate::domain::session::models::SessionState;
use crate::domain::session::models::UserId;
use crate::session::errors::SessionError;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::session::ports::UserRepository;

/// Domain service implementation for login, refresh and revoke flows.
///
/// Concrete implementation of SessionServicePort with dependency injection.
/// The signing secret lives inside the shared `Authenticator` and is never mutated.
pub struct SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<TR>,
    authenticator: Arc<Authenticator>,
    settings: SessionSettings,
}

impl<UR, TR> SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User store used for credential lookup
    /// * `refresh_tokens` - Refresh token store
    /// * `authenticator` - Password and access token primitives
    /// * `settings` - Refresh token TTL and API key
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<TR>,
        authenticator: Arc<Authenticator>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            settings,
        }
    }

    /// Wire the service from loaded configuration.
    ///
    /// The signing secret and API key are read once here and shared read-only afterwards.
    pub fn from_config(config: &AuthConfig, users: Arc<UR>, refresh_tokens: Arc<TR>) -> Self {
        Self::new(
            users,
            refresh_tokens,
            Arc::new(config.authenticator()),
            config.session_settings(),
        )
    }
}

#[async_trait]
impl<UR, TR> SessionServicePort for SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    fn hash_password(&self, password: &str) -> Result<String, SessionError> {
        Ok(self.authenticator.hash_password(password)?)
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<(), SessionError> {
        Ok(self.authenticator.verify_password(password, password_hash)?)
    }

    fn issue_access_token(&self, user_id: &UserId) -> Result<String, SessionError> {
        Ok(self.authenticator.issue_access_token(&user_id.0)?)
    }

    fn verify_access_token(&self, token: &str) -> Result<UserId, SessionError> {
        self.authenticator
            .verify_access_token(token)
            .map(UserId)
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                SessionError::from(e)
            })
    }

    async fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, SessionError> {
        let token = auth::generate_refresh_token().map_err(|e| {
            tracing::error!(error = %e, "Failed to generate refresh token");
            SessionError::from(e)
        })?;

        let stored = self
            .refresh_tokens
            .insert(NewRefreshToken {
                token,
                user_id: *user_id,
                expires_at: Utc::now() + self.settings.refresh_token_ttl,
            })
            .await?;

        tracing::debug!(
            user_id = %user_id,
            expires_at = %stored.expires_at,
            "Refresh token issued"
        );

        Ok(stored)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError> {
        let email =
            EmailAddress::new(command.email).map_err(|_| SessionError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                tracing::info!("Login rejected: unknown email");
                SessionError::InvalidCredentials
            })?;

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Login rejected: bad password");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => SessionError::from(err),
                AuthenticationError::JwtError(err) => SessionError::from(err),
            })?;

        let refresh_token = self.issue_refresh_token(&user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user_id: user.id,
            access_token: result.access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn exchange_refresh_token(&self, token: &str) -> Result<String, SessionError> {
        let stored = self
            .refresh_tokens
            .find_by_token(token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)?;

        match stored.state(Utc::now()) {
            SessionState::Active => {}
            SessionState::Revoked => {
                tracing::warn!(user_id = %stored.user_id, "Revoked refresh token presented");
                return Err(SessionError::TokenRevoked);
            }
            SessionState::Expired => {
                tracing::info!(user_id = %stored.user_id, "Expired refresh token presented");
                return Err(SessionError::TokenExpired);
            }
        }

        self.issue_access_token(&stored.user_id)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<RevokeOutcome, SessionError> {
        match self.refresh_tokens.revoke(token).await {
            Ok(revoked) => {
                tracing::info!(user_id = %revoked.user_id, "Refresh token revoked");
                Ok(RevokeOutcome::Revoked)
            }
            Err(SessionError::RefreshTokenNotFound) => {
                tracing::debug!("Revoke requested for unknown refresh token");
                Ok(RevokeOutcome::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    fn authorize_api_key(&self, presented: &str) -> Result<(), SessionError> {
        if !self.settings.api_key.is_empty() && keys_match(presented, &self.settings.api_key) {
            Ok(())
        } else {
            Err(SessionError::InvalidApiKey)
        }
    }

    fn authorize_owner(&self, subject: &UserId, owner: &UserId) -> Result<(), SessionError> {
        if subject == owner {
            Ok(())
        } else {
            tracing::warn!(user_id = %subject, owner_id = %owner, "Ownership check failed");
            Err(SessionError::Forbidden)
        }
    }
}

/// Byte comparison that visits every byte of `expected` regardless of where the inputs differ.
fn keys_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let mut diff = presented.len() ^ expected.len();

    for (i, byte) in expected.bytes().enumerate() {
        diff |= usize::from(byte ^ presented.get(i).copied().unwrap_or(0));
    }

    diff == 0
}
