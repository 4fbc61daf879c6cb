use core_config::{ConfigError, FromEnv, env_parse, env_required};
use std::time::Duration;

const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 900;
/// 30 days
pub const MAX_ACCESS_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT signing configuration.
///
/// Environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ACCESS_TTL_SECS` (default: 900, at most 2592000)
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        validate_secret(&secret)?;
        Ok(Self {
            secret,
            access_token_ttl: Duration::from_secs(DEFAULT_ACCESS_TOKEN_TTL_SECS),
        })
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Result<Self, ConfigError> {
        validate_ttl(ttl.as_secs())?;
        self.access_token_ttl = ttl;
        Ok(self)
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

fn validate_ttl(ttl_secs: u64) -> Result<(), ConfigError> {
    if ttl_secs == 0 || ttl_secs > MAX_ACCESS_TOKEN_TTL_SECS {
        return Err(ConfigError::ParseError {
            key: "JWT_ACCESS_TTL_SECS".to_string(),
            details: format!(
                "must be between 1 and {} seconds (got {})",
                MAX_ACCESS_TOKEN_TTL_SECS, ttl_secs
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs: u64 = env_parse("JWT_ACCESS_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        validate_ttl(ttl_secs)?;

        Self::new(env_required("JWT_SECRET")?)?.with_access_token_ttl(Duration::from_secs(ttl_secs))
    }
}
