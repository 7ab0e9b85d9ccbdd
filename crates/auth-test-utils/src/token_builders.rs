//! Builder patterns for test data construction
//!
//! Provides a fluent API for hand-crafting compact tokens, including shapes
//! the service itself would never issue (missing claims, foreign algorithms,
//! empty subjects).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Builder for test tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::at(TEST_NOW)
///     .for_user("alice")
///     .expires_in(60)
///     .sign_with(&test_secret_bytes(0));
/// ```
pub struct TestTokenBuilder {
    alg: String,
    sub: Option<Value>,
    iat: Option<i64>,
    exp: Option<i64>,
    extra: Map<String, Value>,
}

impl TestTokenBuilder {
    /// Create a new token builder issued now, expiring in one hour
    pub fn new() -> Self {
        Self::at(Utc::now().timestamp())
    }

    /// Create a builder issued at `now`, expiring one hour later
    pub fn at(now: i64) -> Self {
        Self {
            alg: "HS256".to_string(),
            sub: Some(json!("test-subject")),
            iat: Some(now),
            exp: Some(now + Duration::hours(1).num_seconds()),
            extra: Map::new(),
        }
    }

    /// Set the subject
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = Some(json!(subject));
        self
    }

    /// Set the subject to an arbitrary JSON value (e.g. a number)
    pub fn with_raw_subject(mut self, subject: Value) -> Self {
        self.sub = Some(subject);
        self
    }

    /// Set expiration in seconds relative to `iat`
    pub fn expires_in(mut self, seconds: i64) -> Self {
        let iat = self.iat.unwrap_or_else(|| Utc::now().timestamp());
        self.exp = Some(iat + seconds);
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = Some(timestamp);
        self
    }

    /// Set the header `alg` field
    pub fn with_algorithm(mut self, alg: &str) -> Self {
        self.alg = alg.to_string();
        self
    }

    /// Add a non-standard claim
    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    pub fn without_issued_at(mut self) -> Self {
        self.iat = None;
        self
    }

    pub fn without_expiration(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Build the header as a JSON value
    pub fn build_header(&self) -> Value {
        json!({ "typ": "JWT", "alg": self.alg })
    }

    /// Build the claims as a JSON value
    pub fn build(&self) -> Value {
        let mut claims = self.extra.clone();
        if let Some(sub) = &self.sub {
            claims.insert("sub".to_string(), sub.clone());
        }
        if let Some(iat) = self.iat {
            claims.insert("iat".to_string(), json!(iat));
        }
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        Value::Object(claims)
    }

    /// `base64url(header).base64url(payload)` without a signature
    pub fn signing_input(&self) -> String {
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(self.build_header().to_string()),
            URL_SAFE_NO_PAD.encode(self.build().to_string())
        )
    }

    /// Sign with HMAC-SHA256 over the signing input, whatever `alg` says.
    pub fn sign_with(&self, secret: &[u8]) -> String {
        let signing_input = self.signing_input();
        let mut mac =
            HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{signing_input}.{signature}")
    }

    /// Token with the given literal signature segment.
    pub fn with_signature(&self, signature: &str) -> String {
        format!("{}.{}", self.signing_input(), signature)
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_claims() {
        let claims = TestTokenBuilder::at(1_000).for_user("alice").expires_in(60).build();

        assert_eq!(claims["sub"], "alice");
        assert_eq!(claims["iat"], 1_000);
        assert_eq!(claims["exp"], 1_060);
    }

    #[test]
    fn test_builder_default() {
        let claims = TestTokenBuilder::default().build();
        assert_eq!(claims["sub"], "test-subject");
        assert!(claims["exp"].as_i64().unwrap() > claims["iat"].as_i64().unwrap());
    }

    #[test]
    fn test_builder_omits_removed_claims() {
        let claims = TestTokenBuilder::at(1_000)
            .without_subject()
            .without_issued_at()
            .without_expiration()
            .build();
        assert_eq!(claims, json!({}));
    }

    #[test]
    fn test_builder_extra_claims() {
        let claims = TestTokenBuilder::at(1_000)
            .with_claim("scope", json!("admin"))
            .build();
        assert_eq!(claims["scope"], "admin");
    }

    #[test]
    fn test_sign_with_produces_three_segments() {
        let token = TestTokenBuilder::at(1_000).sign_with(&[0u8; 32]);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_sign_with_is_deterministic() {
        let builder = TestTokenBuilder::at(1_000).for_user("alice");
        assert_eq!(builder.sign_with(&[0u8; 32]), builder.sign_with(&[0u8; 32]));
        assert_ne!(builder.sign_with(&[0u8; 32]), builder.sign_with(&[1u8; 32]));
    }

    #[test]
    fn test_header_carries_algorithm() {
        let header = TestTokenBuilder::at(1_000).with_algorithm("none").build_header();
        assert_eq!(header["alg"], "none");
        assert_eq!(header["typ"], "JWT");
    }
}
