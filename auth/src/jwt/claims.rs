use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Access token lifetime in seconds.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Registered claims carried by an access token.
///
/// The token is self-contained: issuer, subject (user identifier) and the
/// validity window are everything a verifier needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier, UUID string form)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for one hour from `now`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `now` - Issuance instant
    pub fn for_user(user_id: &Uuid, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::seconds(ACCESS_TOKEN_TTL_SECONDS);

        Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the token claims to be issued after `current_timestamp`.
    pub fn is_issued_in_future(&self, current_timestamp: i64) -> bool {
        self.iat > current_timestamp
    }
}
