use async_trait::async_trait;
use auth::credentials::extract_credential;
use auth::Scheme;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::errors::ApiError;
use crate::session::errors::SessionError;

/// Token carried as `Authorization: Bearer <token>`.
///
/// Used for both access tokens and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Key carried as `Authorization: ApiKey <key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyCredential(pub String);

fn credential_from_parts(parts: &Parts, scheme: Scheme) -> Result<String, SessionError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| SessionError::MalformedCredential(scheme.marker()))?;

    let credential = extract_credential(header, scheme).map_err(|e| {
        tracing::debug!(error = %e, scheme = %scheme, "Credential extraction failed");
        SessionError::from(e)
    })?;

    Ok(credential.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(credential_from_parts(parts, Scheme::Bearer)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiKeyCredential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ApiKeyCredential(credential_from_parts(
            parts,
            Scheme::ApiKey,
        )?))
    }
}
