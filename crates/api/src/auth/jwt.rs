//! Gate-stage token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. The `stage`
//! claim records how far through the credential gate the holder got: a
//! challenge token (stage `pin`) is issued after the password step and an
//! access token (stage `authenticated`) after the PIN step.

use folio_core::gate::GateStep;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{env_or, non_empty_env};

/// JWT claims embedded in every gate token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the signed-in email address.
    pub sub: String,
    /// Gate step reached by the holder.
    pub stage: GateStep,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Challenge token lifetime in minutes (default: 5).
    pub challenge_token_expiry_mins: i64,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default challenge token expiry in minutes.
const DEFAULT_CHALLENGE_EXPIRY_MINS: i64 = 5;
/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                      | Default            |
    /// |------------------------------|--------------------|
    /// | `JWT_SECRET`                 | random per process |
    /// | `JWT_CHALLENGE_EXPIRY_MINS`  | `5`                |
    /// | `JWT_ACCESS_EXPIRY_MINS`     | `60`               |
    ///
    /// A random secret invalidates every issued token on restart.
    pub fn from_env() -> Self {
        let secret = non_empty_env("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set; generated a per-process secret");
            random_secret()
        });

        Self {
            secret,
            challenge_token_expiry_mins: env_or(
                "JWT_CHALLENGE_EXPIRY_MINS",
                DEFAULT_CHALLENGE_EXPIRY_MINS,
            ),
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
        }
    }

    /// Lifetime in minutes of a token issued for `stage`.
    pub fn expiry_mins(&self, stage: GateStep) -> i64 {
        match stage {
            GateStep::Authenticated => self.access_token_expiry_mins,
            GateStep::Login | GateStep::Pin => self.challenge_token_expiry_mins,
        }
    }
}

fn random_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Generate an HS256 token for `subject` at the given gate stage.
pub fn generate_token(
    subject: &str,
    stage: GateStep,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_mins(stage) * 60;

    let claims = Claims {
        sub: subject.to_string(),
        stage,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration. The caller checks the stage.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            challenge_token_expiry_mins: 5,
            access_token_expiry_mins: 60,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token("owner@example.com", GateStep::Pin, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "owner@example.com");
        assert_eq!(claims.stage, GateStep::Pin);
        assert_eq!(claims.exp - claims.iat, 5 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_access_token_uses_access_lifetime() {
        let config = test_config();
        let token = generate_token("owner@example.com", GateStep::Authenticated, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.stage, GateStep::Authenticated);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "owner@example.com".to_string(),
            stage: GateStep::Authenticated,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            ..test_config()
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let token = generate_token("owner@example.com", GateStep::Authenticated, &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = random_secret();
        let b = random_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
