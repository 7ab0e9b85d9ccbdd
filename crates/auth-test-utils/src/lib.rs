//! # Auth Test Utilities
//!
//! Shared test utilities for the authentication core.
//!
//! This crate provides:
//! - Deterministic key fixtures (fixed secrets for reproducible tests)
//! - Credential store fixtures built on the in-crate store doubles
//! - Test data builders (`TestTokenBuilder` for hand-crafted tokens)
//! - Fixed test identities, timestamps and lifetimes
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let service = test_token_service(0)?;
//!
//!     // Hand-craft a token the service would never issue
//!     let token = TestTokenBuilder::at(TEST_NOW)
//!         .for_user("")
//!         .sign_with(&test_secret_bytes(0));
//!
//!     // Assert on issued tokens
//!     service.issue_token_at(&alice(), TEST_NOW)?
//!         .assert_valid_jwt()
//!         .assert_for_subject(TEST_IDENTITY_ALICE);
//! }
//! ```

pub mod assertions;
pub mod credential_fixtures;
pub mod crypto_fixtures;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use credential_fixtures::*;
pub use crypto_fixtures::*;
pub use test_ids::*;
pub use token_builders::*;
