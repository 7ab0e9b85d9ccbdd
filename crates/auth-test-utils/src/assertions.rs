//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions on issued token strings. These decode the
//! token without verifying it; signature checks belong to the codec tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// Token header structure
#[derive(Debug, Deserialize)]
struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

/// Token claims structure
#[derive(Debug, Deserialize)]
struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

fn segments(token: &str) -> Vec<&str> {
    token.split('.').collect()
}

fn decode_claims(token: &str) -> TokenClaims {
    let parts = segments(token);
    let payload = URL_SAFE_NO_PAD
        .decode(parts.get(1).expect("Token has no payload segment"))
        .expect("Invalid token payload");
    serde_json::from_slice(&payload).expect("Failed to parse token claims")
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("alice")
///     .assert_issued_at(TEST_NOW)
///     .assert_lifetime(60);
/// ```
pub trait TokenAssertions {
    /// Assert compact three-segment form with an HS256 header and sub/iat/exp claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert the `iat` claim
    fn assert_issued_at(&self, timestamp: i64) -> &Self;

    /// Assert that `exp - iat` equals `seconds`
    fn assert_lifetime(&self, seconds: i64) -> &Self;

    /// Assert that the token expires within the specified seconds of the wall clock
    fn assert_expires_in(&self, seconds: u64) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = segments(self);
        assert_eq!(
            parts.len(),
            3,
            "Token must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );
        assert!(
            parts.iter().all(|p| !p.is_empty()),
            "Token segments must be non-empty"
        );

        let header_result = URL_SAFE_NO_PAD.decode(parts[0]);
        assert!(
            header_result.is_ok(),
            "Failed to base64 decode token header: {:?}",
            header_result.err()
        );

        let header: Result<TokenHeader, _> = serde_json::from_slice(&header_result.unwrap());
        assert!(
            header.is_ok(),
            "Failed to parse token header JSON: {:?}",
            header.err()
        );

        let header = header.unwrap();
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let payload_result = URL_SAFE_NO_PAD.decode(parts[1]);
        assert!(
            payload_result.is_ok(),
            "Failed to base64 decode token payload: {:?}",
            payload_result.err()
        );

        let claims: Result<TokenClaims, _> = serde_json::from_slice(&payload_result.unwrap());
        assert!(
            claims.is_ok(),
            "Failed to parse token claims JSON: {:?}",
            claims.err()
        );

        let signature = URL_SAFE_NO_PAD.decode(parts[2]);
        assert_eq!(
            signature.map(|s| s.len()).ok(),
            Some(32),
            "Expected a 256-bit HMAC signature"
        );

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Expected subject '{}', got '{}'",
            subject, claims.sub
        );
        self
    }

    fn assert_issued_at(&self, timestamp: i64) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.iat, timestamp,
            "Expected iat {}, got {}",
            timestamp, claims.iat
        );
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Expected lifetime of {} seconds, got {}",
            seconds,
            claims.exp - claims.iat
        );
        self
    }

    fn assert_expires_in(&self, seconds: u64) -> &Self {
        let claims = decode_claims(self);
        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;

        // Allow 5-second tolerance for clock movement during the test
        assert!(
            (expires_in - seconds as i64).abs() <= 5,
            "Expected token to expire in {} seconds, but expires in {} seconds",
            seconds,
            expires_in
        );
        self
    }
}
