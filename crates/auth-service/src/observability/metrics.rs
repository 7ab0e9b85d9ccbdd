//! Metrics for the authentication core
//!
//! Recorded through the `metrics` facade; the host process installs the
//! exporter. Naming follows Prometheus conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: 2 values (success, error)
//! - `outcome`: 5 values (valid, malformed, signature_invalid, expired, empty_claims)
//! - `result`: 3 values (found, not_found, error)
//! - `error_category`: 4 values (see [`super::ErrorCategory`])
//! - `operation`: bounded by code (issue_token, validate_token, login, ...)

use metrics::{counter, histogram};
use std::time::Duration;

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance duration and outcome
///
/// Metric: `auth_token_issuance_duration_seconds`, `auth_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("auth_token_issuance_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("auth_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record token validation result
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `outcome`
pub fn record_token_validation(status: &str, outcome: &str) {
    counter!("auth_token_validations_total", "status" => status.to_string(), "outcome" => outcome.to_string())
        .increment(1);
}

// ============================================================================
// Credential Lookup Metrics
// ============================================================================

/// Record a credential store lookup
///
/// Metric: `auth_credential_lookup_duration_seconds`, `auth_credential_lookups_total`
/// Labels: `result`
pub fn record_credential_lookup(result: &str, duration: Duration) {
    histogram!("auth_credential_lookup_duration_seconds", "result" => result.to_string())
        .record(duration.as_secs_f64());

    counter!("auth_credential_lookups_total", "result" => result.to_string()).increment(1);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Record error by category
///
/// Metric: `auth_errors_total`
/// Labels: `operation`, `error_category`
pub fn record_error(operation: &str, error_category: &str) {
    counter!("auth_errors_total",
        "operation" => operation.to_string(),
        "error_category" => error_category.to_string()
    )
    .increment(1);
}
