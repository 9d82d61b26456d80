use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::UserCredentials;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::UserRepository;
use crate::session::errors::SessionError;

/// Read-only view of the `users` table owned by the user store.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: Uuid,
    email: String,
    hashed_password: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, SessionError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, email, hashed_password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "User store failure");
            SessionError::StoreUnavailable(e.to_string())
        })?;

        match row {
            Some(r) => Ok(Some(UserCredentials {
                id: UserId(r.id),
                email: EmailAddress::new(r.email)
                    .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?,
                password_hash: r.hashed_password,
            })),
            None => Ok(None),
        }
    }
}
