//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate and adds the
//! byte-secret helpers used for symmetric key material.
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so a
//! struct that derives `Debug` while holding a secret never prints it through
//! `{:?}` or a tracing field. Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct LoginAttempt {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let attempt = LoginAttempt {
//!     username: "alice".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! assert!(!format!("{attempt:?}").contains("hunter2"));
//! let password: &str = attempt.password.expose_secret();
//! assert_eq!(password, "hunter2");
//! ```
//!
//! Use `SecretString` for passwords, password hashes, bearer tokens and the
//! base64 form of signing secrets. Use [`SecretBytes`] for decoded key
//! material.

pub use secrecy::{ExposeSecret, SecretBox, SecretString};

/// Heap-allocated secret byte buffer (decoded key material).
pub type SecretBytes = SecretBox<Vec<u8>>;

/// Wrap decoded key material so it is redacted in `Debug` and zeroized on drop.
#[must_use]
pub fn secret_bytes(bytes: Vec<u8>) -> SecretBytes {
    SecretBox::new(Box::new(bytes))
}
