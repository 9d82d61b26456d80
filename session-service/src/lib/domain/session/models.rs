use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::session::errors::EmailError;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the user store hands back for a login attempt.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Persisted refresh token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Session state derived from this row at `now`.
    ///
    /// Revocation is terminal and takes precedence over expiry.
    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        if self.revoked_at.is_some() {
            SessionState::Revoked
        } else if now >= self.expires_at {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}

/// Refresh token about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Lifecycle of a login session, derived from its refresh token row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Revoked,
    Expired,
}

/// Result of a revoke request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    /// The store has no row for the presented token.
    NotFound,
}

/// Command to log a user in.
///
/// The email is validated by the service so that a malformed address is
/// indistinguishable from an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Tokens issued by a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
}

/// Immutable settings shared by every session operation.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Lifetime of a refresh token from its creation.
    pub refresh_token_ttl: Duration,
    /// Pre-shared key accepted from the webhook caller.
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh_token(expires_at: DateTime<Utc>, revoked_at: Option<DateTime<Utc>>) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "a".repeat(64),
            user_id: UserId::new(),
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("walt@breakingbad.com".to_string()).is_ok());
        assert!(EmailAddress::new("walt".to_string()).is_err());
    }

    #[test]
    fn test_refresh_token_state() {
        let now = Utc::now();

        assert_eq!(
            refresh_token(now + Duration::days(1), None).state(now),
            SessionState::Active
        );
        assert_eq!(
            refresh_token(now - Duration::seconds(1), None).state(now),
            SessionState::Expired
        );
        assert_eq!(refresh_token(now, None).state(now), SessionState::Expired);
        assert_eq!(
            refresh_token(now + Duration::days(1), Some(now)).state(now),
            SessionState::Revoked
        );
        // Revoked wins over expired
        assert_eq!(
            refresh_token(now - Duration::days(1), Some(now)).state(now),
            SessionState::Revoked
        );
    }
}
