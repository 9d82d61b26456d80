use std::fmt;

use super::errors::CredentialError;

/// Authorization header schemes understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Access and refresh tokens.
    Bearer,
    /// Static pre-shared key for trusted callers.
    ApiKey,
}

impl Scheme {
    /// Literal marker that precedes the credential.
    pub fn marker(&self) -> &'static str {
        match self {
            Scheme::Bearer => "Bearer",
            Scheme::ApiKey => "ApiKey",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Extract the credential following `scheme` from an Authorization header value.
///
/// The header must consist of exactly two whitespace-separated fields, the first
/// being the scheme marker.
///
/// # Arguments
/// * `header` - Raw header value, `None` when the header is absent
/// * `scheme` - Expected scheme
///
/// # Errors
/// * `MissingCredential` - Header absent, empty or whitespace only
/// * `MalformedCredential` - Header present but not `<scheme> <credential>`
pub fn extract_credential(header: Option<&str>, scheme: Scheme) -> Result<&str, CredentialError> {
    let header = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(CredentialError::MissingCredential)?;

    let mut fields = header.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(marker), Some(credential), None) if marker == scheme.marker() => Ok(credential),
        _ => Err(CredentialError::MalformedCredential(scheme.marker())),
    }
}

/// Extract a bearer token from an Authorization header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, CredentialError> {
    extract_credential(header, Scheme::Bearer)
}

/// Extract an API key from an Authorization header value.
pub fn extract_api_key(header: Option<&str>) -> Result<&str, CredentialError> {
    extract_credential(header, Scheme::ApiKey)
}
