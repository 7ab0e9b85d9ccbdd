//! Credential lookup port.
//!
//! A keyed, read-only view of the external user store. Implementations may
//! perform I/O (database, directory service); the token codec never does.

use crate::errors::AuthError;
use crate::models::CredentialRecord;

/// Resolve a username to its stored credential record.
///
/// - `Ok(Some(record))` - exactly one record exists for `username`
/// - `Ok(None)` - no record (the caller treats this as unauthenticated)
/// - `Err(AuthError::Lookup(_))` - the store failed to answer
///
/// No caching is imposed and lookups are not retried by the core.
#[async_trait::async_trait]
pub trait CredentialLookup: Send + Sync {
    async fn find_by_identity(&self, username: &str) -> Result<Option<CredentialRecord>, AuthError>;
}

/// Store doubles for unit and integration tests.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory credential store keyed by identity.
    #[derive(Default)]
    pub struct InMemoryCredentialStore {
        records: HashMap<String, CredentialRecord>,
        call_count: AtomicUsize,
    }

    impl InMemoryCredentialStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a record, replacing any existing record for the same identity.
        pub fn with_record(mut self, record: CredentialRecord) -> Self {
            self.records.insert(record.identity.clone(), record);
            self
        }

        /// Add a record for `identity` with a placeholder password hash.
        pub fn with_user(self, identity: &str, password_hash: &str) -> Self {
            self.with_record(CredentialRecord::new(identity, password_hash))
        }

        /// Get the number of lookups made.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CredentialLookup for InMemoryCredentialStore {
        async fn find_by_identity(
            &self,
            username: &str,
        ) -> Result<Option<CredentialRecord>, AuthError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.get(username).cloned())
        }
    }

    /// Store that fails every lookup.
    #[derive(Default)]
    pub struct FailingCredentialStore {
        call_count: AtomicUsize,
    }

    impl FailingCredentialStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CredentialLookup for FailingCredentialStore {
        async fn find_by_identity(
            &self,
            _username: &str,
        ) -> Result<Option<CredentialRecord>, AuthError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Err(AuthError::Lookup("Mock credential store unavailable".to_string()))
        }
    }

}
