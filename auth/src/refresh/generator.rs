use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token string.
pub const REFRESH_TOKEN_LENGTH: usize = REFRESH_TOKEN_BYTES * 2;

/// Generate an opaque refresh token.
///
/// 32 bytes from the operating system CSPRNG, hex-encoded to 64 characters.
/// There is no fallback to a weaker source.
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_is_64_lowercase_hex_chars() {
        let token = generate_refresh_token().expect("Failed to generate token");

        assert_eq!(token.len(), REFRESH_TOKEN_LENGTH);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let token = generate_refresh_token().expect("Failed to generate token");
            assert_eq!(token.len(), 64);
            assert!(seen.insert(token), "duplicate refresh token generated");
        }
    }
}
