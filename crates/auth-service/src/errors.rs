use crate::config::ConfigError;
use crate::models::ValidationFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or unusable signing configuration. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Bad arguments to token generation (empty identity, non-positive ttl).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Token rejected by the validation pipeline.
    #[error("Invalid token: {0}")]
    InvalidToken(ValidationFailure),

    /// No credential record exists for the requested identity.
    #[error("User not found")]
    UserNotFound,

    /// Credential record found but the external password check rejected it.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The credential store failed to answer.
    #[error("Credential lookup error: {0}")]
    Lookup(String),

    /// Token signing failed.
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl AuthError {
    /// Whether the error means "authentication rejected" rather than a fault.
    ///
    /// Callers mapping to a transport status use this to separate 4xx-class
    /// outcomes from internal errors.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken(_) | AuthError::UserNotFound | AuthError::InvalidCredentials
        )
    }
}

impl From<ValidationFailure> for AuthError {
    fn from(failure: ValidationFailure) -> Self {
        AuthError::InvalidToken(failure)
    }
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failures_are_client_errors() {
        for failure in [
            ValidationFailure::Malformed,
            ValidationFailure::SignatureInvalid,
            ValidationFailure::Expired,
            ValidationFailure::EmptyClaims,
        ] {
            assert!(AuthError::from(failure).is_client_error());
        }
        assert!(AuthError::UserNotFound.is_client_error());
        assert!(AuthError::InvalidCredentials.is_client_error());
    }

    #[test]
    fn test_faults_are_not_client_errors() {
        assert!(!AuthError::Configuration("bad secret".to_string()).is_client_error());
        assert!(!AuthError::InvalidInput("empty identity".to_string()).is_client_error());
        assert!(!AuthError::Lookup("store unavailable".to_string()).is_client_error());
        assert!(!AuthError::Crypto("signing failed".to_string()).is_client_error());
    }

    #[test]
    fn test_invalid_token_message_is_generic() {
        // The classification must not leak through the user-facing message
        let expired = AuthError::from(ValidationFailure::Expired).to_string();
        let tampered = AuthError::from(ValidationFailure::SignatureInvalid).to_string();
        assert_eq!(expired, tampered);
    }

    #[test]
    fn test_config_error_converts_to_configuration() {
        let err = AuthError::from(ConfigError::MissingEnvVar("JWT_SECRET".to_string()));
        assert!(matches!(err, AuthError::Configuration(msg) if msg.contains("JWT_SECRET")));
    }
}
