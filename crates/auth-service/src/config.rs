use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the base64-encoded HMAC signing secret.
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// Environment variable holding the token lifetime in milliseconds.
pub const JWT_EXPIRATION_MS_VAR: &str = "JWT_EXPIRATION_MS";

/// Largest accepted token lifetime (100 years). Keeps `iat + ttl` far from
/// `i64` overflow.
pub const MAX_JWT_EXPIRATION_MS: u64 = 100 * 365 * 24 * 60 * 60 * 1000;

/// Service configuration.
///
/// `jwt_secret` is kept in its encoded form; decoding and length checks
/// happen when the signing key is derived (see [`crate::crypto::SigningKey`]).
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: SecretString,
    pub jwt_expiration: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid token expiration: {0}")]
    InvalidExpiration(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let jwt_secret = vars
            .get(JWT_SECRET_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(JWT_SECRET_VAR.to_string()))?;

        let expiration_raw = vars
            .get(JWT_EXPIRATION_MS_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(JWT_EXPIRATION_MS_VAR.to_string()))?;

        let expiration_ms: u64 = expiration_raw.trim().parse().map_err(|e| {
            ConfigError::InvalidExpiration(format!(
                "{JWT_EXPIRATION_MS_VAR} must be a positive integer, got '{expiration_raw}': {e}"
            ))
        })?;

        if expiration_ms == 0 {
            return Err(ConfigError::InvalidExpiration(format!(
                "{JWT_EXPIRATION_MS_VAR} must be greater than 0"
            )));
        }

        if expiration_ms > MAX_JWT_EXPIRATION_MS {
            return Err(ConfigError::InvalidExpiration(format!(
                "{JWT_EXPIRATION_MS_VAR} must be at most {MAX_JWT_EXPIRATION_MS}, got {expiration_ms}"
            )));
        }

        Ok(Config {
            jwt_secret: SecretString::from(jwt_secret.clone()),
            jwt_expiration: Duration::from_millis(expiration_ms),
        })
    }
}
