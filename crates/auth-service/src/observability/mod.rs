//! Observability helpers for the authentication core.
//!
//! # Privacy by Default
//!
//! Crypto and service functions use `#[instrument(skip_all)]` and log an
//! explicit allow-list of fields. Fields fall into three groups:
//! - **SAFE**: plaintext (outcome labels, timestamps, key length)
//! - **HASHED**: SHA-256 prefix for correlation (token subject, username)
//! - **NEVER**: tokens, signing secrets, passwords, password hashes

pub mod metrics;

use crate::errors::AuthError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// One-way and truncated: enough to follow a username across log lines
/// without writing it in plaintext. Not a security primitive.
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    hex::encode(digest.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unknown user or rejected password
    Authentication,
    /// Token rejected by the validation pipeline
    Token,
    /// Bad caller input or signing configuration
    Input,
    /// Credential store or signer failure
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Token => "token",
            ErrorCategory::Input => "input",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&AuthError> for ErrorCategory {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::UserNotFound | AuthError::InvalidCredentials => ErrorCategory::Authentication,
            AuthError::InvalidToken(_) => ErrorCategory::Token,
            AuthError::InvalidInput(_) | AuthError::Configuration(_) => ErrorCategory::Input,
            AuthError::Lookup(_) | AuthError::Crypto(_) => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationFailure;

    #[test]
    fn test_hash_for_correlation_consistency() {
        assert_eq!(hash_for_correlation("alice"), hash_for_correlation("alice"));
    }

    #[test]
    fn test_hash_for_correlation_uniqueness() {
        assert_ne!(hash_for_correlation("alice"), hash_for_correlation("bob"));
    }

    #[test]
    fn test_hash_for_correlation_length() {
        let hash = hash_for_correlation("any-value");
        assert_eq!(hash.len(), 8, "Hash should be 8 hex characters");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_for_correlation_does_not_contain_input() {
        assert!(!hash_for_correlation("alice").contains("alice"));
    }

    #[test]
    fn test_error_category_mapping() {
        assert_eq!(
            ErrorCategory::from(&AuthError::UserNotFound),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::InvalidCredentials),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::InvalidToken(ValidationFailure::Expired)),
            ErrorCategory::Token
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::InvalidInput("empty".into())),
            ErrorCategory::Input
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::Configuration("short".into())),
            ErrorCategory::Input
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::Lookup("down".into())),
            ErrorCategory::Internal
        );
        assert_eq!(
            ErrorCategory::from(&AuthError::Crypto("sign".into())),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Authentication.as_str(), "authentication");
        assert_eq!(ErrorCategory::Token.as_str(), "token");
        assert_eq!(ErrorCategory::Input.as_str(), "input");
        assert_eq!(ErrorCategory::Internal.as_str(), "internal");
    }
}
