use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    /// The operating system entropy source could not be read.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}
