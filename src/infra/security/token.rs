//! Identity token capability backed by HS256 JWTs.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and decodes identity tokens.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenSigner: Send + Sync {
    /// Issue a token whose subject is `subject`.
    fn sign(&self, subject: &str) -> AppResult<String>;

    /// Verify a token's signature and expiry and return its claims.
    fn decode(&self, token: &str) -> AppResult<Claims>;
}

/// HMAC-SHA256 JWT signer.
pub struct JwtTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtTokenSigner {
    pub fn new(secret: &[u8], expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_hours,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes(), config.jwt_expiration_hours)
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, subject: &str) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.expiration_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Token lifetime of {} hours is out of range",
                    self.expiration_hours
                ))
            })?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_sign_and_decode_round_trip_subject() {
        let signer = JwtTokenSigner::new(SECRET, 1);
        let token = signer.sign("a@x.com").unwrap();

        let claims = signer.decode(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let signer = JwtTokenSigner::new(SECRET, 1);
        let other = JwtTokenSigner::new(b"another-secret-key-that-is-32-chars-long", 1);
        let token = other.sign("a@x.com").unwrap();

        assert!(matches!(signer.decode(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_out_of_range_lifetime_is_internal_error() {
        let signer = JwtTokenSigner::new(SECRET, i64::MAX / 1000);

        assert!(matches!(signer.sign("a@x.com"), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let signer = JwtTokenSigner::new(SECRET, -1);
        let token = signer.sign("a@x.com").unwrap();

        assert!(matches!(signer.decode(&token), Err(AppError::Jwt(_))));
    }
}
