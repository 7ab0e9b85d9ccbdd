//! Fixed test values for deterministic tests
//!
//! All tests that pass an explicit `now` use these values so results do not
//! depend on the wall clock.

use std::time::Duration;

// Identities
pub const TEST_IDENTITY_ALICE: &str = "alice";
pub const TEST_IDENTITY_BOB: &str = "bob";
pub const TEST_IDENTITY_CAROL: &str = "carol";

// Plaintext passwords (paired with `MockPasswordVerifier::plaintext`)
pub const TEST_PASSWORD_ALICE: &str = "alice-correct-horse";
pub const TEST_PASSWORD_CAROL: &str = "carol-battery-staple";

// Time (Unix epoch seconds): 2023-11-14T22:13:20Z
pub const TEST_NOW: i64 = 1_700_000_000;

// Token lifetime matching JWT_EXPIRATION_MS=60000
pub const TEST_TTL_MS: u64 = 60_000;
pub const TEST_TTL: Duration = Duration::from_millis(TEST_TTL_MS);
pub const TEST_TTL_SECS: i64 = 60;
