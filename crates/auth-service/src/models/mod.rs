//! Data models for the authentication core.
//!
//! None of these types are persisted here. `CredentialRecord` is owned by the
//! external store and only read through [`crate::repositories::CredentialLookup`].

use common::secret::SecretString;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// An already-authenticated identity, ready to be bound into a token.
///
/// This is the only input shape token issuance accepts. The login flow
/// builds it from a stored record with [`Principal::from_record`] once the
/// password check succeeds. [`Principal::authenticated`] is the caller's own
/// assertion that an identity was authenticated elsewhere; it does not
/// consult the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    identity: String,
}

impl Principal {
    /// Build the minimal credential view of a stored record.
    pub fn from_record(record: &CredentialRecord) -> Self {
        Self {
            identity: record.identity.clone(),
        }
    }

    /// Wrap an identity the caller has authenticated by other means.
    pub fn authenticated(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("identity", &"[REDACTED]")
            .finish()
    }
}

/// Stored credential representation (owned by the external store).
///
/// `password_hash` is a `SecretString`, so `Debug` output is redacted.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRecord {
    pub identity: String,
    pub password_hash: SecretString,
}

impl CredentialRecord {
    pub fn new(identity: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password_hash: SecretString::from(password_hash.into()),
        }
    }
}

/// Claims of a token that passed every validation stage.
///
/// The `subject` is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub subject: String,
    /// Issued-at (Unix epoch seconds)
    pub issued_at: i64,
    /// Expiration (Unix epoch seconds)
    pub expires_at: i64,
}

impl fmt::Debug for VerifiedClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifiedClaims")
            .field("subject", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Why a token was rejected.
///
/// Validation is staged: structure, then signature, then expiry, then
/// payload completeness. The first failing stage decides the variant.
///
/// Every variant displays the same generic message; use [`Self::as_str`] for
/// the classification in logs and metrics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationFailure {
    /// Not three non-empty base64url segments, oversized, or undecodable.
    #[error("The access token is invalid or expired")]
    Malformed,

    /// HMAC mismatch or a header algorithm other than HS256.
    #[error("The access token is invalid or expired")]
    SignatureInvalid,

    /// `now` is strictly after the `exp` claim.
    #[error("The access token is invalid or expired")]
    Expired,

    /// Subject (or a timestamp claim) missing or empty.
    #[error("The access token is invalid or expired")]
    EmptyClaims,
}

impl ValidationFailure {
    /// Stable label for logs and metrics (bounded cardinality).
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFailure::Malformed => "malformed",
            ValidationFailure::SignatureInvalid => "signature_invalid",
            ValidationFailure::Expired => "expired",
            ValidationFailure::EmptyClaims => "empty_claims",
        }
    }
}

/// Outcome of the token validation pipeline.
pub type ValidationResult = Result<VerifiedClaims, ValidationFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::secret::ExposeSecret;

    #[test]
    fn test_principal_from_record_keeps_identity_only() {
        let record = CredentialRecord::new("alice", "$2b$12$hash");
        let principal = Principal::from_record(&record);
        assert_eq!(principal.identity(), "alice");
    }

    #[test]
    fn test_authenticated_principal_matches_store_backed_one() {
        // No store involved: the identity is taken as asserted
        let asserted = Principal::authenticated("dave");
        assert_eq!(asserted.identity(), "dave");

        let stored = Principal::from_record(&CredentialRecord::new("dave", "hash"));
        assert_eq!(asserted, stored);
    }

    #[test]
    fn test_principal_debug_redacts_identity() {
        let principal = Principal::authenticated("alice");
        let debug = format!("{principal:?}");
        assert!(!debug.contains("alice"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_record_debug_redacts_hash() {
        let record = CredentialRecord::new("bob", "$2b$12$supersecrethash");
        let debug = format!("{record:?}");
        assert!(debug.contains("bob"));
        assert!(!debug.contains("supersecrethash"));
        assert_eq!(record.password_hash.expose_secret(), "$2b$12$supersecrethash");
    }

    #[test]
    fn test_verified_claims_debug_redacts_subject() {
        let claims = VerifiedClaims {
            subject: "carol".to_string(),
            issued_at: 1_700_000_000,
            expires_at: 1_700_000_060,
        };
        let debug = format!("{claims:?}");
        assert!(!debug.contains("carol"));
        assert!(debug.contains("1700000060"));
    }

    #[test]
    fn test_validation_failure_labels_are_distinct() {
        let labels = [
            ValidationFailure::Malformed.as_str(),
            ValidationFailure::SignatureInvalid.as_str(),
            ValidationFailure::Expired.as_str(),
            ValidationFailure::EmptyClaims.as_str(),
        ];
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn test_validation_failure_display_is_generic() {
        assert_eq!(
            ValidationFailure::Malformed.to_string(),
            "The access token is invalid or expired"
        );
        assert_eq!(
            ValidationFailure::Expired.to_string(),
            ValidationFailure::SignatureInvalid.to_string()
        );
    }
}
