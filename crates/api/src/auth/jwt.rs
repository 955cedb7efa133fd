//! Validation of the auth provider's HS256 access tokens.
//!
//! The provider puts the user's UUID in `sub`. When `JWT_AUDIENCE` is set the
//! `aud` claim must match it; otherwise the audience is not checked.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use homeinv_core::types::UserId;

use crate::config::{required, ConfigError};

/// Claims read from every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's user id.
    pub sub: UserId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Configuration for access-token validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth provider.
    pub secret: String,
    /// Expected `aud` claim, if any.
    pub audience: Option<String>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_AUDIENCE` | no       | unset   |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            secret: required(lookup, "JWT_SECRET")?,
            audience: lookup("JWT_AUDIENCE").filter(|a| !a.trim().is_empty()),
        })
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry, plus the audience when configured.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    match &config.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Mint an access token the way the auth provider does.
///
/// Production tokens come from the provider; this exists for integration
/// tests and local development.
pub fn generate_access_token(
    user_id: UserId,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + ttl_secs,
        iat: Some(now),
        aud: config.audience.clone(),
        email: None,
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: None,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let user = Uuid::new_v4();
        let token = generate_access_token(user, 900, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, user);
        assert!(claims.exp > claims.iat.unwrap());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well beyond the default 60-second leeway.
        let token = generate_access_token(Uuid::new_v4(), -300, &config).unwrap();
        assert!(validate_token(&token, &config).is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret".to_string(),
            audience: None,
        };
        let token = generate_access_token(Uuid::new_v4(), 900, &config_a).unwrap();
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_audience_is_enforced_when_configured() {
        let provider = JwtConfig {
            audience: Some("authenticated".into()),
            ..test_config()
        };
        let token = generate_access_token(Uuid::new_v4(), 900, &provider).unwrap();
        assert!(validate_token(&token, &provider).is_ok());

        let other = JwtConfig {
            audience: Some("service_role".into()),
            ..test_config()
        };
        assert!(validate_token(&token, &other).is_err());

        // Audience present in the token but not configured: accepted.
        assert!(validate_token(&token, &test_config()).is_ok());
    }
}
