//! Authentication primitives for Chirpy
//!
//! Provides the building blocks of the login and session flows:
//! - Password hashing (Argon2id)
//! - Access token minting and verification (HS256 JWT, issuer `chirpy`, one hour TTL)
//! - Opaque refresh token generation
//! - Authorization header credential extraction (`Bearer`, `ApiKey`)
//! - Authentication coordination
//!
//! Everything here is synchronous and storage-free. Session state lives in the service
//! that consumes this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(&user_id).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Credentials
//! ```
//! use auth::{extract_bearer, generate_refresh_token, CredentialError};
//!
//! assert_eq!(extract_bearer(Some("Bearer abc123")), Ok("abc123"));
//! assert_eq!(extract_bearer(Some("")), Err(CredentialError::MissingCredential));
//! assert_eq!(generate_refresh_token().unwrap().len(), 64);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer;
pub use credentials::CredentialError;
pub use credentials::Scheme;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
