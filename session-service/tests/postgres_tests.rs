//! Repository tests against a live database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use session_service::config::AuthConfig;
use session_service::config::DatabaseConfig;
use session_service::repositories;
use session_service::repositories::PostgresRefreshTokenRepository;
use session_service::repositories::PostgresUserRepository;
use session_service::session::ports::RefreshTokenRepository;
use session_service::session::ports::UserRepository;
use session_service::EmailAddress;
use session_service::LoginCommand;
use session_service::NewRefreshToken;
use session_service::RevokeOutcome;
use session_service::SessionError;
use session_service::SessionService;
use session_service::SessionServicePort;
use session_service::SessionState;
use session_service::UserId;
use sqlx::PgPool;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    repositories::connect(&DatabaseConfig {
        url,
        max_connections: 2,
    })
    .await
    .expect("Failed to connect")
}

async fn seed_user(pool: &PgPool) -> (UserId, EmailAddress) {
    let id = UserId::new();
    let email = EmailAddress::new(format!("{}@chirpy.test", id)).unwrap();

    sqlx::query("INSERT INTO users (id, email, hashed_password) VALUES ($1, $2, $3)")
        .bind(id.0)
        .bind(email.as_str())
        .bind("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .execute(pool)
        .await
        .expect("Failed to seed user");

    (id, email)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_find_user_by_email() {
    let pool = pool().await;
    let (id, email) = seed_user(&pool).await;
    let users = PostgresUserRepository::new(pool);

    let found = users
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(found.id, id);

    let missing = EmailAddress::new("nobody@chirpy.test".to_string()).unwrap();
    assert!(users.find_by_email(&missing).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_refresh_token_lifecycle() {
    let pool = pool().await;
    let (user_id, _) = seed_user(&pool).await;
    let tokens = PostgresRefreshTokenRepository::new(pool);

    let token = auth::generate_refresh_token().unwrap();
    let inserted = tokens
        .insert(NewRefreshToken {
            token: token.clone(),
            user_id,
            expires_at: Utc::now() + Duration::days(60),
        })
        .await
        .unwrap();
    assert_eq!(inserted.state(Utc::now()), SessionState::Active);

    let first = tokens.revoke(&token).await.unwrap();
    let second = tokens.revoke(&token).await.unwrap();
    assert!(first.revoked_at.is_some());
    assert_eq!(first.revoked_at, second.revoked_at);

    let stored = tokens.find_by_token(&token).await.unwrap().unwrap();
    assert_eq!(stored.state(Utc::now()), SessionState::Revoked);

    assert_eq!(
        tokens.revoke("unknown").await,
        Err(SessionError::RefreshTokenNotFound)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_service_wired_against_postgres() {
    let pool = pool().await;
    let auth_config = AuthConfig {
        token_secret: "postgres-wiring-secret-at-least-32-bytes".to_string(),
        api_key: "f271c81ff7084ee5b99a5091b42d486e".to_string(),
        refresh_token_ttl_days: 60,
    };
    let service = SessionService::from_config(
        &auth_config,
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
    );

    let id = UserId::new();
    let email = format!("{}@chirpy.test", id);
    sqlx::query("INSERT INTO users (id, email, hashed_password) VALUES ($1, $2, $3)")
        .bind(id.0)
        .bind(&email)
        .bind(service.hash_password("04234").unwrap())
        .execute(&pool)
        .await
        .expect("Failed to seed user");

    let outcome = service
        .login(LoginCommand::new(email, "04234"))
        .await
        .expect("Login failed");
    assert_eq!(outcome.user_id, id);

    let access_token = service
        .exchange_refresh_token(&outcome.refresh_token)
        .await
        .expect("Exchange failed");
    assert_eq!(service.verify_access_token(&access_token), Ok(id));

    assert_eq!(
        service.revoke_refresh_token(&outcome.refresh_token).await,
        Ok(RevokeOutcome::Revoked)
    );
    assert_eq!(
        service.exchange_refresh_token(&outcome.refresh_token).await,
        Err(SessionError::TokenRevoked)
    );
}
