use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Algorithms a token may be signed with. Anything outside the HMAC family is rejected.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// JWT handler for minting and verifying access tokens.
///
/// Tokens are signed with HS256 under a process-wide shared secret and carry
/// `{iss, sub, iat, exp}`. Verification is stateless.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Mint an access token for `user_id`, valid for one hour from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: &Uuid) -> Result<String, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Mint an access token as if issued at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(&self, user_id: &Uuid, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, issued_at))
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify an access token and return the user identifier it was issued for.
    ///
    /// Every check must pass: HMAC algorithm, signature, issuer, issued-at not in
    /// the future, expiry not passed, and a subject that parses as a UUID.
    ///
    /// # Errors
    /// * `Malformed` - Token is empty or cannot be decoded
    /// * `AlgorithmMismatch` - Header names `none` or a non-HMAC algorithm
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `TokenExpired` - `exp` is in the past
    /// * `NotYetValid` - `iat` is in the future
    /// * `InvalidIssuer` - Issuer is not `chirpy`
    /// * `InvalidSubject` - Subject is not a valid identifier
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_issued_in_future(Utc::now().timestamp()) {
            return Err(JwtError::NotYetValid);
        }

        Uuid::parse_str(&claims.sub).map_err(|e| JwtError::InvalidSubject(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// See [`JwtHandler::verify`].
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let algorithm = peek_algorithm(token)?;
        let is_accepted = algorithm
            .parse::<Algorithm>()
            .is_ok_and(|parsed| ACCEPTED_ALGORITHMS.contains(&parsed));
        if !is_accepted {
            return Err(JwtError::AlgorithmMismatch(algorithm));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::AlgorithmMismatch(algorithm.clone())
                }
                ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                ErrorKind::ImmatureSignature => JwtError::NotYetValid,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

/// Read the `alg` header field without trusting anything else in the token.
fn peek_algorithm(token: &str) -> Result<String, JwtError> {
    let mut segments = token.split('.');
    let header = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(_), Some(_), None) if !header.is_empty() => header,
        _ => return Err(JwtError::Malformed("expected three segments".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::Malformed(e.to_string()))?;
    let raw: RawHeader =
        serde_json::from_slice(&bytes).map_err(|e| JwtError::Malformed(e.to_string()))?;

    Ok(raw.alg)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn forge(header: &str, claims: &Claims, signature: &str) -> String {
        let payload = serde_json::to_vec(claims).expect("Failed to serialize claims");
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload),
            signature
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = handler.issue(&user_id).expect("Failed to issue token");
        assert!(!token.is_empty());

        let verified = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_decode_returns_registered_claims() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = handler.issue(&user_id).expect("Failed to issue token");
        let claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue(&Uuid::new_v4())
            .expect("Failed to issue token");

        assert_eq!(handler2.verify(&token), Err(JwtError::SignatureInvalid));
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(2);

        let token = handler
            .issue_at(&Uuid::new_v4(), issued_at)
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::TokenExpired));
    }

    fn claims_expiring_at(user_id: &Uuid, exp: i64) -> Claims {
        Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: exp - 3600,
            exp,
        }
    }

    #[test]
    fn test_verify_accepts_token_at_expiry_second() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        // Retry if the wall clock crosses a second boundary mid-check
        for _ in 0..5 {
            let now = Utc::now().timestamp();
            let token = handler
                .encode(&claims_expiring_at(&user_id, now))
                .expect("Failed to encode token");
            let result = handler.verify(&token);

            if Utc::now().timestamp() == now {
                assert_eq!(result, Ok(user_id));
                return;
            }
        }
        panic!("Clock kept advancing during verification");
    }

    #[test]
    fn test_verify_rejects_token_one_second_past_expiry() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = handler
            .encode(&claims_expiring_at(&user_id, Utc::now().timestamp() - 1))
            .expect("Failed to encode token");

        assert_eq!(handler.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_verify_token_issued_in_future() {
        let handler = JwtHandler::new(SECRET);
        let issued_at = Utc::now() + Duration::minutes(10);

        let token = handler
            .issue_at(&Uuid::new_v4(), issued_at)
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::NotYetValid));
    }

    #[test]
    fn test_verify_rejects_none_algorithm() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_user(&Uuid::new_v4(), Utc::now());
        let token = forge(r#"{"alg":"none","typ":"JWT"}"#, &claims, "");

        assert_eq!(
            handler.verify(&token),
            Err(JwtError::AlgorithmMismatch("none".to_string()))
        );
    }

    #[test]
    fn test_verify_rejects_asymmetric_algorithm() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_user(&Uuid::new_v4(), Utc::now());
        let token = forge(r#"{"alg":"RS256","typ":"JWT"}"#, &claims, "c2lnbmF0dXJl");

        assert_eq!(
            handler.verify(&token),
            Err(JwtError::AlgorithmMismatch("RS256".to_string()))
        );
    }

    #[test]
    fn test_verify_rejects_foreign_issuer() {
        let handler = JwtHandler::new(SECRET);
        let mut claims = Claims::for_user(&Uuid::new_v4(), Utc::now());
        claims.iss = "someone-else".to_string();

        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(handler.verify(&token), Err(JwtError::InvalidIssuer));
    }

    #[test]
    fn test_verify_rejects_non_uuid_subject() {
        let handler = JwtHandler::new(SECRET);
        let mut claims = Claims::for_user(&Uuid::new_v4(), Utc::now());
        claims.sub = "user123".to_string();

        let token = handler.encode(&claims).expect("Failed to encode token");

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::InvalidSubject(_))
        ));
    }

    #[test]
    fn test_verify_malformed_tokens() {
        let handler = JwtHandler::new(SECRET);

        for token in ["", ".", "invalid.token.here", "a.b", "a.b.c.d", "ey.ey.ey"] {
            assert!(
                matches!(handler.verify(token), Err(JwtError::Malformed(_))),
                "token {:?} should be malformed",
                token
            );
        }
    }
}
