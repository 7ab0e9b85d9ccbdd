//! Read-only ports onto external stores.
//!
//! The core never writes to a store. User records are owned elsewhere and
//! reached through [`CredentialLookup`].

pub mod credentials;

pub use credentials::CredentialLookup;
