#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use session_service::inbound::http::middleware::authenticate;
use session_service::inbound::http::middleware::require_api_key;
use session_service::inbound::http::ApiError;
use session_service::inbound::http::AuthenticatedUser;
use session_service::inbound::http::BearerToken;
use session_service::repositories::InMemoryRefreshTokenRepository;
use session_service::repositories::InMemoryUserRepository;
use session_service::EmailAddress;
use session_service::RevokeOutcome;
use session_service::SessionService;
use session_service::SessionServicePort;
use session_service::SessionSettings;
use session_service::UserCredentials;
use session_service::UserId;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

pub type TestSessionService = SessionService<InMemoryUserRepository, InMemoryRefreshTokenRepository>;

/// Session service wired to in-memory stores
pub struct TestApp {
    pub service: Arc<TestSessionService>,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    pub fn spawn() -> Self {
        init_tracing();

        let users = Arc::new(InMemoryUserRepository::new());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let settings = SessionSettings {
            refresh_token_ttl: Duration::days(60),
            api_key: TEST_API_KEY.to_string(),
        };

        let service = Arc::new(SessionService::new(
            Arc::clone(&users),
            Arc::clone(&refresh_tokens),
            Arc::new(Authenticator::new(TEST_SECRET)),
            settings,
        ));

        Self {
            service,
            users,
            refresh_tokens,
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Register a user the way the user store would: hash first, then persist.
    pub async fn create_user(&self, email: &str, password: &str) -> UserId {
        let password_hash = self
            .service
            .hash_password(password)
            .expect("Failed to hash password");
        let id = UserId::new();

        self.users
            .insert(UserCredentials {
                id,
                email: EmailAddress::new(email.to_string()).expect("Invalid email"),
                password_hash,
            })
            .await;

        id
    }

    /// Minimal router exercising the boundary pieces.
    pub fn router(&self) -> Router {
        let state = Arc::clone(&self.service);

        let protected_routes = Router::new()
            .route("/api/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                authenticate::<TestSessionService>,
            ));

        let webhook_routes = Router::new()
            .route("/api/polka/webhooks", post(webhook))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key::<TestSessionService>,
            ));

        let session_routes = Router::new()
            .route("/api/refresh", post(refresh))
            .route("/api/revoke", post(revoke))
            .with_state(state);

        Router::new()
            .merge(protected_routes)
            .merge(webhook_routes)
            .merge(session_routes)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn whoami(user: AuthenticatedUser) -> Json<Value> {
    Json(json!({ "user_id": user.user_id.to_string() }))
}

async fn webhook() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn refresh(
    State(service): State<Arc<TestSessionService>>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, ApiError> {
    let access_token = service.exchange_refresh_token(&token).await?;
    Ok(Json(json!({ "token": access_token })))
}

async fn revoke(
    State(service): State<Arc<TestSessionService>>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, ApiError> {
    // Logout stays idempotent for the caller
    match service.revoke_refresh_token(&token).await? {
        RevokeOutcome::Revoked | RevokeOutcome::NotFound => Ok(StatusCode::NO_CONTENT),
    }
}
