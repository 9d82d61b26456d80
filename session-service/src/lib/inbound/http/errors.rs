use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::session::errors::SessionError;

const UNAUTHORIZED: &str = "Unauthorized";
const FORBIDDEN: &str = "Forbidden";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";
const SERVICE_UNAVAILABLE: &str = "Service unavailable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    InternalServerError(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Collapses session errors into what a caller may see.
///
/// Every credential and token failure becomes the same 401 so a client cannot
/// learn which check failed. Server-side failures never masquerade as 401.
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingCredential
            | SessionError::MalformedCredential(_)
            | SessionError::InvalidCredentials
            | SessionError::TokenExpired
            | SessionError::TokenRevoked
            | SessionError::RefreshTokenNotFound
            | SessionError::SignatureInvalid
            | SessionError::AlgorithmMismatch(_)
            | SessionError::MalformedToken(_)
            | SessionError::InvalidClaims(_)
            | SessionError::InvalidApiKey => {
                tracing::debug!(error = %err, "Request unauthorized");
                ApiError::Unauthorized(UNAUTHORIZED.to_string())
            }
            SessionError::Forbidden => ApiError::Forbidden(FORBIDDEN.to_string()),
            SessionError::HashingFailure(_)
            | SessionError::TokenEncodingFailed(_)
            | SessionError::EntropyFailure(_) => {
                tracing::error!(error = %err, "Authentication subsystem failure");
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR.to_string())
            }
            SessionError::StoreUnavailable(_) => {
                tracing::error!(error = %err, "Token store unavailable");
                ApiError::ServiceUnavailable(SERVICE_UNAVAILABLE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self::new(status_code, ApiErrorData { message })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
