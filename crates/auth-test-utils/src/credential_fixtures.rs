//! Credential store fixtures
//!
//! The store and verifier doubles themselves live next to the traits they
//! implement (`auth_service::repositories::credentials::mock`,
//! `auth_service::services::user_service::mock`); this module only seeds them.

use crate::test_ids::{
    TEST_IDENTITY_ALICE, TEST_IDENTITY_CAROL, TEST_PASSWORD_ALICE, TEST_PASSWORD_CAROL,
};
use auth_service::models::Principal;
pub use auth_service::repositories::credentials::mock::{
    FailingCredentialStore, InMemoryCredentialStore,
};
pub use auth_service::services::user_service::mock::MockPasswordVerifier;

/// Store holding alice and carol. Bob is deliberately absent.
///
/// Stored "hashes" are the plaintext passwords, for use with
/// [`MockPasswordVerifier::plaintext`].
pub fn test_credential_store() -> InMemoryCredentialStore {
    InMemoryCredentialStore::new()
        .with_user(TEST_IDENTITY_ALICE, TEST_PASSWORD_ALICE)
        .with_user(TEST_IDENTITY_CAROL, TEST_PASSWORD_CAROL)
}

/// Principal for alice, as login would build it.
pub fn alice() -> Principal {
    Principal::authenticated(TEST_IDENTITY_ALICE)
}
