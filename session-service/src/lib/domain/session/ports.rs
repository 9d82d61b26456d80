use async_trait::async_trait;

use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::NewRefreshToken;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RevokeOutcome;
use crate::domain::session::models::UserCredentials;
use crate::domain::session::models::UserId;
use crate::session::errors::SessionError;

/// Port for session domain service operations.
///
/// This is the contract the HTTP boundary (and any other transport) consumes.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Hash a plaintext password for storage by the user store.
    ///
    /// # Errors
    /// * `HashingFailure` - The hashing primitive rejected the input
    fn hash_password(&self, password: &str) -> Result<String, SessionError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Mismatch or unusable hash
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<(), SessionError>;

    /// Mint a one hour access token for a user.
    ///
    /// # Errors
    /// * `TokenEncodingFailed` - Signing failed
    fn issue_access_token(&self, user_id: &UserId) -> Result<String, SessionError>;

    /// Verify an access token and return the user it was issued for.
    ///
    /// Stateless: no store is consulted.
    ///
    /// # Errors
    /// * `MalformedToken`, `AlgorithmMismatch`, `SignatureInvalid`, `TokenExpired`, `InvalidClaims`
    fn verify_access_token(&self, token: &str) -> Result<UserId, SessionError>;

    /// Generate and persist a new refresh token for a user.
    ///
    /// # Errors
    /// * `EntropyFailure` - OS random source unavailable
    /// * `StoreUnavailable` - Token store failed
    async fn issue_refresh_token(&self, user_id: &UserId) -> Result<RefreshToken, SessionError>;

    /// Authenticate with email and password, issuing an access and a refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, malformed email or wrong password
    /// * `EntropyFailure`, `StoreUnavailable`, `TokenEncodingFailed` - Server-side failures
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token is not rotated and stays usable until it expires or is revoked.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Unknown token
    /// * `TokenRevoked` - Token was revoked
    /// * `TokenExpired` - Token is past its expiry
    /// * `StoreUnavailable` - Token store failed
    async fn exchange_refresh_token(&self, token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token.
    ///
    /// Revoking an unknown or already revoked token is not an error. The outcome tells
    /// the caller whether the store knew the token so it can pick its response.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Token store failed
    async fn revoke_refresh_token(&self, token: &str) -> Result<RevokeOutcome, SessionError>;

    /// Compare a presented API key against the configured one.
    ///
    /// # Errors
    /// * `InvalidApiKey` - Keys differ
    fn authorize_api_key(&self, presented: &str) -> Result<(), SessionError>;

    /// Check that an authenticated user owns a resource.
    ///
    /// # Errors
    /// * `Forbidden` - `subject` is not `owner`
    fn authorize_owner(&self, subject: &UserId, owner: &UserId) -> Result<(), SessionError>;
}

/// Read access to the user store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve login credentials by email address.
    ///
    /// # Returns
    /// Optional credentials (None if no user has this email)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, SessionError>;
}

/// Persistence operations for refresh tokens.
///
/// Atomicity of each operation is the store's responsibility.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh token.
    ///
    /// # Returns
    /// Stored row with creation timestamps
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn insert(&self, token: NewRefreshToken) -> Result<RefreshToken, SessionError>;

    /// Retrieve a refresh token by value.
    ///
    /// # Returns
    /// Optional row (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Mark a refresh token revoked.
    ///
    /// An already revoked row keeps its original `revoked_at`.
    ///
    /// # Returns
    /// Updated row
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No row with this token
    /// * `StoreUnavailable` - Database operation failed
    async fn revoke(&self, token: &str) -> Result<RefreshToken, SessionError>;
}
