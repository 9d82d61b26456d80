pub mod memory;
pub mod refresh_token;
pub mod user;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

pub use memory::InMemoryRefreshTokenRepository;
pub use memory::InMemoryUserRepository;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use user::PostgresUserRepository;

/// Open a connection pool and apply pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(pool)
}
