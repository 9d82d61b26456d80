use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use super::errors::ApiError;
use super::extractors::ApiKeyCredential;
use super::extractors::BearerToken;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::SessionServicePort;
use crate::session::errors::SessionError;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and adds the user to request extensions
pub async fn authenticate<SS>(
    State(service): State<Arc<SS>>,
    BearerToken(token): BearerToken,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    SS: SessionServicePort,
{
    let user_id = service.verify_access_token(&token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware that admits only callers presenting the configured API key
pub async fn require_api_key<SS>(
    State(service): State<Arc<SS>>,
    ApiKeyCredential(key): ApiKeyCredential,
    req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    SS: SessionServicePort,
{
    service.authorize_api_key(&key).map_err(|e| {
        tracing::warn!("Rejected request with invalid API key");
        ApiError::from(e)
    })?;

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::from(SessionError::MissingCredential))
    }
}
