//! Compact-token structural utilities.
//!
//! This module holds the parts of token handling that need no key:
//! - Size limit for DoS prevention
//! - Splitting a compact token into its three segments
//! - Decoding the header segment to read the declared algorithm
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE splitting or decoding
//! - Nothing here verifies a signature; a successful split says only that
//!   the token is shaped like `header.payload.signature`
//! - Error messages are generic to prevent information leakage. Details are
//!   logged at debug level for troubleshooting.
//!
//! # Usage
//!
//! ```rust
//! use common::jwt::{decode_header, split_compact, HS256};
//!
//! let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.c2ln";
//! let parts = split_compact(token).unwrap();
//! let header = decode_header(parts.header).unwrap();
//! assert_eq!(header.alg, HS256);
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed token size in bytes (8KB).
///
/// Tokens larger than this are rejected before any base64 decoding or HMAC
/// computation. A typical HS256 token with `sub`, `iat` and `exp` is well
/// under 200 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Algorithm identifier for HMAC-SHA256 in the token header.
pub const HS256: &str = "HS256";

// =============================================================================
// Error Types
// =============================================================================

/// Errors from structural inspection of a compact token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtStructureError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token is not three non-empty segments, or a segment does not decode.
    #[error("The access token is invalid or expired")]
    MalformedToken,
}

// =============================================================================
// Types
// =============================================================================

/// Borrowed view of the three segments of a compact token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactToken<'a> {
    /// Base64url-encoded header.
    pub header: &'a str,
    /// Base64url-encoded payload.
    pub payload: &'a str,
    /// Base64url-encoded signature.
    pub signature: &'a str,
}

/// Token header fields relevant to verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwtHeader {
    /// Declared signing algorithm (e.g. `HS256`).
    pub alg: String,

    /// Declared token type, usually `JWT`.
    #[serde(default)]
    pub typ: Option<String>,
}

// =============================================================================
// Functions
// =============================================================================

/// Split a compact token into header, payload and signature.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` - not exactly three segments, or any segment is empty
pub fn split_compact(token: &str) -> Result<CompactToken<'_>, JwtStructureError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtStructureError::TokenTooLarge);
    }

    let segments: Vec<&str> = token.split('.').collect();
    let &[header, payload, signature] = segments.as_slice() else {
        tracing::debug!(
            target: "common.jwt",
            parts = segments.len(),
            "Token rejected: invalid compact format"
        );
        return Err(JwtStructureError::MalformedToken);
    };

    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        tracing::debug!(target: "common.jwt", "Token rejected: empty segment");
        return Err(JwtStructureError::MalformedToken);
    }

    Ok(CompactToken {
        header,
        payload,
        signature,
    })
}

/// Decode one base64url (unpadded) segment.
///
/// # Errors
///
/// Returns `MalformedToken` if the segment is not valid base64url.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, JwtStructureError> {
    URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode token segment base64");
        JwtStructureError::MalformedToken
    })
}

/// Decode and parse the header segment.
///
/// # Errors
///
/// Returns `MalformedToken` if the segment is not base64url, not JSON, or
/// has no string `alg` field.
pub fn decode_header(segment: &str) -> Result<JwtHeader, JwtStructureError> {
    let bytes = decode_segment(segment)?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse token header JSON");
        JwtStructureError::MalformedToken
    })
}

// =============================================================================
// Tests
// =============================================================================
