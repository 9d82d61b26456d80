use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Owns the signing secret for the lifetime of the process. It holds no mutable
/// state, so a single instance can be shared behind an `Arc` by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Wrong password or unusable stored hash; callers cannot tell which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `MalformedHash` - Stored hash is unusable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate an access token for `user_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the hash is malformed
    /// * `PasswordError` - Password primitive failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) | Err(PasswordError::MalformedHash(_)) => {
                return Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => return Err(e.into()),
        }

        let access_token = self.jwt_handler.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate an access token without password verification.
    ///
    /// Used by the refresh flow, where identity was established by the refresh token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(&self, user_id: &Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Any verification check failed
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.verify(token)
    }
}
