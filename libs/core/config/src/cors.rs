use crate::{ConfigError, FromEnv, env_or_default};

/// Origin of the ParkEase web front end during local development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Cross-origin policy: exactly one browser origin may call the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl CorsConfig {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGIN)
    }
}

impl FromEnv for CorsConfig {
    /// Reads `CORS_ALLOWED_ORIGIN`. The value must be a bare origin
    /// (scheme + host + optional port), so a trailing slash is stripped.
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CORS_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        let origin = raw.trim().trim_end_matches('/');

        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: format!("expected an http(s) origin, got '{}'", raw),
            });
        }

        Ok(Self::new(origin))
    }
}
