//! User-facing authentication flows on top of the credential lookup port.
//!
//! Provides principal loading, the login flow and subject back-mapping.
//! Password hashing and verification stay outside the core and are reached
//! through [`PasswordVerifier`].

use crate::errors::AuthError;
use crate::models::{CredentialRecord, Principal};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::{record_credential_lookup, record_error};
use crate::observability::ErrorCategory;
use crate::repositories::CredentialLookup;
use crate::services::token_service::TokenService;
use common::secret::ExposeSecret;
use std::time::Instant;
use tracing::instrument;

/// Verified against when the username is unknown, so that a miss costs the
/// same as a wrong password.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// External password check.
///
/// Implementations wrap the real hashing scheme (bcrypt, argon2, ...).
/// Must return `Ok(false)` for a mismatch and reserve `Err` for faults such
/// as an unparseable hash.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;
}

/// Look up a record and record lookup metrics.
async fn find_record<L>(lookup: &L, username: &str) -> Result<Option<CredentialRecord>, AuthError>
where
    L: CredentialLookup + ?Sized,
{
    let start = Instant::now();
    let result = lookup.find_by_identity(username).await;

    let label = match &result {
        Ok(Some(_)) => "found",
        Ok(None) => "not_found",
        Err(_) => "error",
    };
    record_credential_lookup(label, start.elapsed());

    result
}

/// Load the principal for `username`.
///
/// Never synthesizes a principal: a missing record is an error.
///
/// # Errors
///
/// - `AuthError::UserNotFound` - no record for `username`
/// - `AuthError::Lookup` - the store failed
#[instrument(skip_all)]
pub async fn load_principal<L>(lookup: &L, username: &str) -> Result<Principal, AuthError>
where
    L: CredentialLookup + ?Sized,
{
    match find_record(lookup, username).await? {
        Some(record) => Ok(Principal::from_record(&record)),
        None => {
            tracing::debug!(
                target: "auth.login",
                user = %hash_for_correlation(username),
                "User not found with the given username"
            );
            Err(AuthError::UserNotFound)
        }
    }
}

/// Authenticate `username`/`password` and issue a token.
///
/// # Steps
///
/// 1. Look up the credential record
/// 2. Verify the password (against a dummy hash when the user is unknown)
/// 3. Build the principal from the record
/// 4. Issue a token
///
/// # Errors
///
/// - `AuthError::InvalidCredentials` - unknown user or wrong password. The
///   two are not distinguished to callers.
/// - `AuthError::Lookup` - the store failed
/// - any error from the verifier for a known user, or from token issuance
#[instrument(skip_all)]
pub async fn login<L, V>(
    lookup: &L,
    verifier: &V,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> Result<String, AuthError>
where
    L: CredentialLookup + ?Sized,
    V: PasswordVerifier + ?Sized,
{
    let result = authenticate(lookup, verifier, username, password).await;

    let principal = match result {
        Ok(principal) => principal,
        Err(e) => {
            record_error("login", ErrorCategory::from(&e).as_str());
            return Err(e);
        }
    };

    let token = tokens.issue_token(&principal)?;

    tracing::info!(
        target: "auth.login",
        user = %hash_for_correlation(principal.identity()),
        "Login succeeded"
    );

    Ok(token)
}

async fn authenticate<L, V>(
    lookup: &L,
    verifier: &V,
    username: &str,
    password: &str,
) -> Result<Principal, AuthError>
where
    L: CredentialLookup + ?Sized,
    V: PasswordVerifier + ?Sized,
{
    let Some(record) = find_record(lookup, username).await? else {
        // Result is discarded: the verifier may not understand the dummy
        // hash format, and an unknown user must stay a client error.
        let _ = verifier.verify(password, DUMMY_PASSWORD_HASH);
        tracing::debug!(
            target: "auth.login",
            user = %hash_for_correlation(username),
            "Login rejected: unknown user"
        );
        return Err(AuthError::InvalidCredentials);
    };

    let is_valid = verifier.verify(password, record.password_hash.expose_secret())?;

    if !is_valid {
        tracing::debug!(
            target: "auth.login",
            user = %hash_for_correlation(username),
            "Login rejected: password mismatch"
        );
        return Err(AuthError::InvalidCredentials);
    }

    Ok(Principal::from_record(&record))
}

/// Validate `token` and fetch the stored record for its subject.
///
/// The token is validated once. The record may have been removed since
/// issuance, in which case this reports `UserNotFound`.
///
/// # Errors
///
/// - `AuthError::InvalidToken` - validation failed
/// - `AuthError::UserNotFound` - subject no longer in the store
/// - `AuthError::Lookup` - the store failed
#[instrument(skip_all)]
pub async fn resolve_record<L>(
    lookup: &L,
    tokens: &TokenService,
    token: &str,
) -> Result<CredentialRecord, AuthError>
where
    L: CredentialLookup + ?Sized,
{
    let identity = tokens.extract_identity(token)?;

    match find_record(lookup, &identity).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            tracing::debug!(
                target: "auth.login",
                user = %hash_for_correlation(&identity),
                "Token subject no longer exists"
            );
            record_error("resolve_record", ErrorCategory::Authentication.as_str());
            Err(AuthError::UserNotFound)
        }
        Err(e) => {
            record_error("resolve_record", ErrorCategory::from(&e).as_str());
            Err(e)
        }
    }
}

/// Password verifier doubles for unit and integration tests.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Accept,
        Reject,
        Fail,
        CompareToHash,
    }

    /// Mock password verifier with a fixed behavior.
    pub struct MockPasswordVerifier {
        behavior: Behavior,
        call_count: AtomicUsize,
    }

    impl MockPasswordVerifier {
        fn with_behavior(behavior: Behavior) -> Self {
            Self {
                behavior,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Accept every password.
        pub fn accepting() -> Self {
            Self::with_behavior(Behavior::Accept)
        }

        /// Reject every password.
        pub fn rejecting() -> Self {
            Self::with_behavior(Behavior::Reject)
        }

        /// Return a verifier fault for every call.
        pub fn failing() -> Self {
            Self::with_behavior(Behavior::Fail)
        }

        /// Accept when the password equals the stored "hash" verbatim.
        pub fn plaintext() -> Self {
            Self::with_behavior(Behavior::CompareToHash)
        }

        /// Get the number of calls made.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl PasswordVerifier for MockPasswordVerifier {
        fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            match self.behavior {
                Behavior::Accept => Ok(true),
                Behavior::Reject => Ok(false),
                Behavior::Fail => Err(AuthError::Crypto(
                    "Mock password verification failed".to_string(),
                )),
                Behavior::CompareToHash => Ok(password == password_hash),
            }
        }
    }
}
