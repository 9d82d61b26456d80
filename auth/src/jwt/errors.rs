use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Empty, truncated or otherwise undecodable token.
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token uses a disallowed signing algorithm: {0}")]
    AlgorithmMismatch(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token subject is not a valid identifier: {0}")]
    InvalidSubject(String),
}
