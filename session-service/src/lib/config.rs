use std::env;

use auth::Authenticator;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::session::models::SessionSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret for signing access tokens.
    pub token_secret: String,
    /// Pre-shared key for the webhook caller.
    pub api_key: String,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_refresh_token_ttl_days() -> i64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CHIRPY__AUTH__TOKEN_SECRET, CHIRPY__DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: CHIRPY__AUTH__API_KEY=... overrides auth.api_key
            .add_source(Environment::with_prefix("CHIRPY").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_secret.is_empty() {
            return Err(ConfigError::Message("auth.token_secret must not be empty".into()));
        }
        if self.auth.api_key.is_empty() {
            return Err(ConfigError::Message("auth.api_key must not be empty".into()));
        }
        if self.auth.refresh_token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "auth.refresh_token_ttl_days must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl AuthConfig {
    /// Build the process-wide authenticator from the signing secret.
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.token_secret.as_bytes())
    }

    /// Settings consumed by the session service.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            refresh_token_ttl: Duration::days(self.refresh_token_ttl_days),
            api_key: self.api_key.clone(),
        }
    }
}
