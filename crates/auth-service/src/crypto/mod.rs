//! Symmetric signing key material and the token codec.
//!
//! - [`SigningKey`] is derived once from the configured base64 secret and
//!   passed explicitly into every codec operation. There is no global key.
//! - [`token`] holds generation, validation and identity extraction.

pub mod token;

use crate::errors::AuthError;
use base64::{engine::general_purpose, Engine as _};
use common::secret::{secret_bytes, ExposeSecret, SecretBytes};
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fmt;
use tracing::instrument;

/// Minimum HMAC-SHA256 key length in bytes (256 bits).
pub const MIN_HS256_KEY_BYTES: usize = 32;

/// HMAC-SHA256 key material.
///
/// Read-only after construction and safe to share between threads without
/// locking. Debug output is fully redacted and the bytes are zeroized on drop.
pub struct SigningKey {
    material: SecretBytes,
}

impl SigningKey {
    /// Derive a signing key from a base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the secret is empty, is not
    /// standard base64, or decodes to fewer than [`MIN_HS256_KEY_BYTES`] bytes.
    #[instrument(skip_all)]
    pub fn derive(secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "JWT secret is empty".to_string(),
            ));
        }

        let decoded = general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| AuthError::Configuration(format!("JWT secret is not valid base64: {e}")))?;

        Self::from_bytes(decoded)
    }

    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if fewer than
    /// [`MIN_HS256_KEY_BYTES`] bytes are supplied.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AuthError> {
        if bytes.len() < MIN_HS256_KEY_BYTES {
            return Err(AuthError::Configuration(format!(
                "JWT secret decodes to {} bits, HS256 requires at least {} bits",
                bytes.len() * 8,
                MIN_HS256_KEY_BYTES * 8
            )));
        }

        tracing::debug!(target: "auth.key", key_bits = bytes.len() * 8, "Signing key derived");

        Ok(Self {
            material: secret_bytes(bytes),
        })
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.material.expose_secret())
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.material.expose_secret())
    }
}

impl Clone for SigningKey {
    fn clone(&self) -> Self {
        Self {
            material: secret_bytes(self.material.expose_secret().clone()),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("material", &"[REDACTED]")
            .finish()
    }
}
