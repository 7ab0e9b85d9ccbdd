//! Binding between authenticated principals and the token codec.
//!
//! The free functions [`issue_token`] and [`resolve_principal`] are the thin
//! adapter: they take the key and time explicitly and never look at
//! credentials. [`TokenService`] is the caller-facing API built once at
//! startup from [`Config`]; it holds the key and ttl, reads the wall clock,
//! and records metrics.

use crate::config::Config;
use crate::crypto::{token, SigningKey};
use crate::errors::AuthError;
use crate::models::{Principal, ValidationFailure, ValidationResult};
use crate::observability::metrics::{record_error, record_token_issuance};
use crate::observability::ErrorCategory;
use chrono::Utc;
use common::secret::ExposeSecret;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Issue a token for an already-authenticated principal.
///
/// # Errors
///
/// See [`token::generate`].
pub fn issue_token(
    principal: &Principal,
    key: &SigningKey,
    now: i64,
    ttl: Duration,
) -> Result<String, AuthError> {
    token::generate(principal.identity(), now, ttl, key)
}

/// Validate a token and return the identity it was issued to.
///
/// # Errors
///
/// Returns the classified [`ValidationFailure`] if any pipeline stage fails.
pub fn resolve_principal(token: &str, key: &SigningKey, now: i64) -> Result<String, ValidationFailure> {
    token::extract_identity(token, key, now)
}

/// Caller-facing token API.
///
/// Holds the process-wide signing key and token lifetime. Cheap to share by
/// reference across tasks; nothing inside is mutable.
#[derive(Debug, Clone)]
pub struct TokenService {
    key: SigningKey,
    ttl: Duration,
}

impl TokenService {
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if `ttl` is zero.
    pub fn new(key: SigningKey, ttl: Duration) -> Result<Self, AuthError> {
        if ttl.is_zero() {
            return Err(AuthError::InvalidInput(
                "Token ttl must be positive".to_string(),
            ));
        }

        Ok(Self { key, ttl })
    }

    /// Derive the signing key from configuration.
    ///
    /// Callers must refuse to serve if this fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the secret is unusable.
    #[instrument(skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let key = SigningKey::derive(config.jwt_secret.expose_secret())?;

        tracing::info!(
            target: "auth.key",
            ttl_ms = u64::try_from(config.jwt_expiration.as_millis()).unwrap_or(u64::MAX),
            "Token service initialized"
        );

        Self::new(key, config.jwt_expiration)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from now for the configured ttl.
    ///
    /// # Errors
    ///
    /// See [`token::generate`].
    pub fn issue_token(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_token_at(principal, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix epoch seconds).
    ///
    /// # Errors
    ///
    /// See [`token::generate`].
    #[instrument(skip_all)]
    pub fn issue_token_at(&self, principal: &Principal, now: i64) -> Result<String, AuthError> {
        let start = Instant::now();
        let result = issue_token(principal, &self.key, now, self.ttl);

        match &result {
            Ok(_) => record_token_issuance("success", start.elapsed()),
            Err(e) => {
                record_token_issuance("error", start.elapsed());
                record_error("issue_token", ErrorCategory::from(e).as_str());
            }
        }

        result
    }

    /// Whether the token passes every validation stage right now.
    pub fn validate_token(&self, token: &str) -> bool {
        self.validate_token_at(token, Utc::now().timestamp())
    }

    pub fn validate_token_at(&self, token: &str, now: i64) -> bool {
        self.verify_at(token, now).is_ok()
    }

    /// Full validation outcome, for callers that need the classification.
    pub fn verify(&self, token: &str) -> ValidationResult {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> ValidationResult {
        token::validate(token, &self.key, now)
    }

    /// Identity the token was issued to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` carrying the classification.
    pub fn extract_identity(&self, token: &str) -> Result<String, AuthError> {
        self.extract_identity_at(token, Utc::now().timestamp())
    }

    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` carrying the classification.
    pub fn extract_identity_at(&self, token: &str, now: i64) -> Result<String, AuthError> {
        resolve_principal(token, &self.key, now).map_err(|failure| {
            record_error("extract_identity", ErrorCategory::Token.as_str());
            AuthError::from(failure)
        })
    }
}
