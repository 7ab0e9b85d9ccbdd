//! Deterministic signing key fixtures for testing
//!
//! All fixtures are derived from a seed value, so the same seed always
//! produces the same key material.

use crate::test_ids::TEST_TTL;
use auth_service::config::{Config, JWT_EXPIRATION_MS_VAR, JWT_SECRET_VAR};
use auth_service::crypto::SigningKey;
use auth_service::services::TokenService;
use base64::engine::general_purpose;
use base64::Engine;
use std::collections::HashMap;
use thiserror::Error;

/// Test fixture error type
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fixture construction failed: {0}")]
    Auth(#[from] auth_service::errors::AuthError),

    #[error("Fixture configuration failed: {0}")]
    Config(#[from] auth_service::config::ConfigError),
}

/// Deterministic 256-bit secret.
///
/// Seed 0 yields 32 zero bytes. Other seeds fill a byte pattern so that
/// distinct seeds give distinct keys.
pub fn test_secret_bytes(seed: u8) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    if seed == 0 {
        return bytes;
    }

    for (i, byte) in (0u8..).zip(bytes.iter_mut()) {
        *byte = seed.wrapping_mul(i).wrapping_add(i).wrapping_add(seed);
    }
    bytes
}

/// [`test_secret_bytes`] in the standard base64 form `JWT_SECRET` expects.
pub fn test_secret_base64(seed: u8) -> String {
    general_purpose::STANDARD.encode(test_secret_bytes(seed))
}

/// Signing key derived from [`test_secret_base64`].
pub fn test_signing_key(seed: u8) -> Result<SigningKey, FixtureError> {
    Ok(SigningKey::derive(&test_secret_base64(seed))?)
}

/// Environment-style variables for [`Config::from_vars`].
pub fn test_config_vars(seed: u8, expiration_ms: u64) -> HashMap<String, String> {
    HashMap::from([
        (JWT_SECRET_VAR.to_string(), test_secret_base64(seed)),
        (JWT_EXPIRATION_MS_VAR.to_string(), expiration_ms.to_string()),
    ])
}

/// Token service built through the same path as production startup:
/// variables, then [`Config`], then key derivation.
pub fn test_token_service(seed: u8) -> Result<TokenService, FixtureError> {
    let expiration_ms = u64::try_from(TEST_TTL.as_millis()).unwrap_or(u64::MAX);
    let config = Config::from_vars(&test_config_vars(seed, expiration_ms))?;
    Ok(TokenService::from_config(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_zero_is_all_zero_bytes() {
        assert_eq!(test_secret_bytes(0), [0u8; 32]);
        assert_eq!(
            test_secret_base64(0),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
        );
    }

    #[test]
    fn test_secret_is_deterministic() {
        assert_eq!(test_secret_bytes(7), test_secret_bytes(7));
    }

    #[test]
    fn test_different_seeds_produce_different_secrets() {
        assert_ne!(test_secret_bytes(1), test_secret_bytes(2));
        assert_ne!(test_secret_bytes(0), test_secret_bytes(1));
    }

    #[test]
    fn test_signing_key_derives() {
        assert!(test_signing_key(0).is_ok());
        assert!(test_signing_key(42).is_ok());
    }

    #[test]
    fn test_token_service_uses_test_ttl() {
        let service = test_token_service(0).unwrap();
        assert_eq!(service.ttl(), TEST_TTL);
    }
}
