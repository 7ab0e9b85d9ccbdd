//! HS256 compact token codec.
//!
//! Wire format: `base64url(header).base64url(payload).base64url(signature)`
//! with header `{"typ":"JWT","alg":"HS256"}`, payload `{"sub","iat","exp"}`
//! (Unix epoch seconds) and an HMAC-SHA256 signature over
//! `header.payload`. Any standard JWT library can read these tokens.
//!
//! Validation runs as an ordered pipeline and stops at the first failing
//! stage:
//!
//! 1. Structure: size cap, three non-empty segments, decodable header
//! 2. Signature: header must declare HS256; HMAC compared in constant time
//! 3. Expiry: `now` strictly after `exp`
//! 4. Completeness: non-empty `sub`, present `iat`
//!
//! Failures are returned as [`ValidationFailure`] values, never raised, and
//! time is always the caller's `now` so the pipeline is deterministic.

use crate::crypto::SigningKey;
use crate::errors::AuthError;
use crate::models::{ValidationFailure, ValidationResult, VerifiedClaims};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_validation;
use common::jwt::{decode_header, split_compact, HS256};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::instrument;

const TOKEN_TYPE: &str = "JWT";

/// Claims written into every issued token.
///
/// The `sub` field holds a username and is redacted in Debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub iat: i64,    // Issued at timestamp
    pub exp: i64,    // Expiration timestamp
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Payload as read back from an untrusted token. Every claim is optional so
/// that a missing claim is classified by the pipeline instead of failing
/// deserialization.
#[derive(Deserialize)]
struct UntrustedClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Sign a token for `identity`, valid from `now` until `now + ttl`.
///
/// `ttl` is truncated to whole seconds when computing `exp`.
///
/// # Errors
///
/// - `AuthError::InvalidInput` - empty identity, zero ttl, or `exp` overflow.
///   Checked before any signing.
/// - `AuthError::Crypto` - the signer failed
#[instrument(skip_all)]
pub fn generate(
    identity: &str,
    now: i64,
    ttl: Duration,
    key: &SigningKey,
) -> Result<String, AuthError> {
    if identity.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "Token identity must not be empty".to_string(),
        ));
    }

    if ttl.is_zero() {
        return Err(AuthError::InvalidInput(
            "Token ttl must be positive".to_string(),
        ));
    }

    let exp = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|ttl_secs| now.checked_add(ttl_secs))
        .ok_or_else(|| AuthError::InvalidInput("Token expiration overflows".to_string()))?;

    let claims = Claims {
        sub: identity.to_string(),
        iat: now,
        exp,
    };

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some(TOKEN_TYPE.to_string());

    let token = encode(&header, &claims, &key.encoding_key())
        .map_err(|e| AuthError::Crypto(format!("Token signing operation failed: {e}")))?;

    tracing::debug!(
        target: "auth.token",
        subject = %hash_for_correlation(identity),
        iat = now,
        exp = exp,
        "Token generated"
    );

    Ok(token)
}

/// Run the validation pipeline against `now` (Unix epoch seconds).
///
/// Records `auth_token_validations_total` with the outcome.
#[instrument(skip_all)]
pub fn validate(token: &str, key: &SigningKey, now: i64) -> ValidationResult {
    let result = run_pipeline(token, key, now);

    match &result {
        Ok(claims) => {
            tracing::debug!(
                target: "auth.token",
                subject = %hash_for_correlation(&claims.subject),
                "Token validated"
            );
            record_token_validation("success", "valid");
        }
        Err(failure) => record_token_validation("error", failure.as_str()),
    }

    result
}

/// Validate then project the subject.
///
/// # Errors
///
/// Returns the same [`ValidationFailure`] that [`validate`] would.
pub fn extract_identity(token: &str, key: &SigningKey, now: i64) -> Result<String, ValidationFailure> {
    validate(token, key, now).map(|claims| claims.subject)
}

fn run_pipeline(token: &str, key: &SigningKey, now: i64) -> ValidationResult {
    // Stage 1: structure
    let parts = split_compact(token).map_err(|_| ValidationFailure::Malformed)?;
    let header = decode_header(parts.header).map_err(|_| ValidationFailure::Malformed)?;

    // Stage 2: signature (algorithm pinned to HS256, never taken from the token)
    if header.alg != HS256 {
        tracing::warn!(
            target: "auth.token",
            "Token rejected: unsupported signing algorithm"
        );
        return Err(ValidationFailure::SignatureInvalid);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let payload = decode::<UntrustedClaims>(token, &key.decoding_key(), &validation)
        .map_err(classify_decode_error)?
        .claims;

    // Stage 3: expiry
    let Some(expires_at) = payload.exp else {
        tracing::debug!(target: "auth.token", "Token rejected: missing exp claim");
        return Err(ValidationFailure::EmptyClaims);
    };

    if now > expires_at {
        tracing::debug!(
            target: "auth.token",
            exp = expires_at,
            now = now,
            "Token rejected: expired"
        );
        return Err(ValidationFailure::Expired);
    }

    // Stage 4: completeness
    let Some(subject) = payload.sub.filter(|sub| !sub.trim().is_empty()) else {
        tracing::debug!(target: "auth.token", "Token rejected: missing or empty subject");
        return Err(ValidationFailure::EmptyClaims);
    };

    let Some(issued_at) = payload.iat else {
        tracing::debug!(target: "auth.token", "Token rejected: missing iat claim");
        return Err(ValidationFailure::EmptyClaims);
    };

    Ok(VerifiedClaims {
        subject,
        issued_at,
        expires_at,
    })
}

fn classify_decode_error(err: jsonwebtoken::errors::Error) -> ValidationFailure {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat => {
            tracing::warn!(target: "auth.token", error = %err, "Token rejected: signature check failed");
            ValidationFailure::SignatureInvalid
        }
        _ => {
            tracing::debug!(target: "auth.token", error = %err, "Token rejected: undecodable payload");
            ValidationFailure::Malformed
        }
    }
}
