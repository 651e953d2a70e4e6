use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::services::ServiceError;

/// Mints and verifies the bearer tokens embedded in emergency QR codes.
///
/// Tokens are HS256 JWTs. They are not stored anywhere: a token is valid for
/// any number of redemptions until its `exp` passes.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

/// Claims carried by an emergency access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Registered user the token grants access to
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            default_ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    /// Lifetime applied to codes generated by the service.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for `user_id` that expires `ttl` from now.
    pub fn mint(&self, user_id: &str, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = AccessTokenClaims {
            user_id: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Failed to encode token: {}", e)))
    }

    /// Verify signature and expiry, returning the bound user id.
    pub fn validate(&self, token: &str) -> Result<String, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => {
                    tracing::debug!(error = %e, "Rejected malformed or forged token");
                    ServiceError::InvalidToken
                }
            })?;

        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        TokenCodec::new(&TokenConfig {
            secret: Secret::new(secret.to_string()),
            ttl_minutes: 60,
        })
    }

    fn codec() -> TokenCodec {
        codec_with_secret("unit-test-signing-secret-0123456789")
    }

    #[test]
    fn default_ttl_comes_from_config() {
        assert_eq!(codec().default_ttl(), Duration::hours(1));
    }

    #[test]
    fn minted_token_validates_to_same_user() -> Result<(), ServiceError> {
        let codec = codec();
        let token = codec.mint("user3", codec.default_ttl())?;

        assert_eq!(codec.validate(&token)?, "user3");
        Ok(())
    }

    #[test]
    fn token_stays_valid_across_repeated_redemptions() -> Result<(), ServiceError> {
        let codec = codec();
        let token = codec.mint("user1", codec.default_ttl())?;

        for _ in 0..3 {
            assert_eq!(codec.validate(&token)?, "user1");
        }
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected_as_expired() -> Result<(), ServiceError> {
        let codec = codec();
        let token = codec.mint("user1", Duration::seconds(-5))?;

        assert!(matches!(
            codec.validate(&token),
            Err(ServiceError::TokenExpired)
        ));
        Ok(())
    }

    #[test]
    fn token_from_another_secret_is_invalid() -> Result<(), ServiceError> {
        let token = codec_with_secret("some-other-secret-that-is-long-enough")
            .mint("user1", Duration::hours(1))?;

        assert!(matches!(
            codec().validate(&token),
            Err(ServiceError::InvalidToken)
        ));
        Ok(())
    }

    #[test]
    fn swapped_payload_breaks_signature() -> Result<(), ServiceError> {
        let codec = codec();
        let victim = codec.mint("user1", Duration::hours(1))?;
        let attacker = codec.mint("user2", Duration::hours(1))?;

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let attacker_parts: Vec<&str> = attacker.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            victim_parts[0], victim_parts[1], attacker_parts[2]
        );

        assert!(matches!(
            codec.validate(&forged),
            Err(ServiceError::InvalidToken)
        ));
        Ok(())
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = codec();
        for token in ["", "not-a-jwt", "a.b.c", "...."] {
            assert!(matches!(
                codec.validate(token),
                Err(ServiceError::InvalidToken)
            ));
        }
    }

    #[test]
    fn claims_carry_issue_and_expiry() -> Result<(), anyhow::Error> {
        let codec = codec();
        let token = codec.mint("user7", Duration::minutes(10))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let claims = decode::<AccessTokenClaims>(&token, &codec.decoding_key, &validation)?.claims;

        assert_eq!(claims.user_id, "user7");
        assert_eq!(claims.exp - claims.iat, 600);
        Ok(())
    }
}
