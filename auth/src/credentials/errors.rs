use thiserror::Error;

/// Error type for credential extraction.
///
/// Both variants are client failures; they stay distinct for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No credential was provided")]
    MissingCredential,

    #[error("Credential does not match the {0} scheme")]
    MalformedCredential(&'static str),
}
