use auth::CredentialError;
use auth::JwtError;
use auth::PasswordError;
use auth::RefreshTokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all session operations.
///
/// Kinds stay fine-grained for logging and tests. The HTTP boundary collapses the
/// client-facing ones into a single unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    // Credential extraction
    #[error("Missing credential")]
    MissingCredential,

    #[error("Malformed credential: expected {0} scheme")]
    MalformedCredential(&'static str),

    // Login
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Access and refresh tokens
    #[error("Token is expired")]
    TokenExpired,

    #[error("Refresh token has been revoked")]
    TokenRevoked,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token uses a disallowed algorithm: {0}")]
    AlgorithmMismatch(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token claims are invalid: {0}")]
    InvalidClaims(String),

    // Authorization
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Forbidden")]
    Forbidden,

    // Server-side failures
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token encoding failed: {0}")]
    TokenEncodingFailed(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyFailure(String),

    #[error("Token store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<CredentialError> for SessionError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::MissingCredential => SessionError::MissingCredential,
            CredentialError::MalformedCredential(scheme) => SessionError::MalformedCredential(scheme),
        }
    }
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => SessionError::TokenEncodingFailed(msg),
            JwtError::Malformed(msg) => SessionError::MalformedToken(msg),
            JwtError::AlgorithmMismatch(alg) => SessionError::AlgorithmMismatch(alg),
            JwtError::SignatureInvalid => SessionError::SignatureInvalid,
            JwtError::TokenExpired => SessionError::TokenExpired,
            other @ (JwtError::NotYetValid
            | JwtError::InvalidIssuer
            | JwtError::InvalidSubject(_)) => SessionError::InvalidClaims(other.to_string()),
        }
    }
}

impl From<PasswordError> for SessionError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::HashingFailed(msg) => SessionError::HashingFailure(msg),
            PasswordError::Mismatch | PasswordError::MalformedHash(_) => {
                SessionError::InvalidCredentials
            }
        }
    }
}

impl From<RefreshTokenError> for SessionError {
    fn from(err: RefreshTokenError) -> Self {
        match err {
            RefreshTokenError::EntropyUnavailable(msg) => SessionError::EntropyFailure(msg),
        }
    }
}
