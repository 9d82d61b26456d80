use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The password does not match the stored hash.
    #[error("Password does not match")]
    Mismatch,

    /// The stored value is not a PHC string this hasher understands.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
