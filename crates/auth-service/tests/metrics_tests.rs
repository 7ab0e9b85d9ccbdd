//! Metric emission checks using a local debugging recorder.
//!
//! `metrics::with_local_recorder` scopes the recorder to the closure, so these
//! tests do not interfere with each other or with the global no-op recorder.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use auth_service::models::Principal;
use auth_test_utils::*;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

/// Counter values keyed by `name{label=value,...}` (labels sorted).
fn counters(recorder: &DebuggingRecorder) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = recorder
        .snapshotter()
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(count) => {
                let key = key.key();
                let mut labels: Vec<String> = key
                    .labels()
                    .map(|l| format!("{}={}", l.key(), l.value()))
                    .collect();
                labels.sort();
                Some((format!("{}{{{}}}", key.name(), labels.join(",")), count))
            }
            _ => None,
        })
        .collect();
    out.sort();
    out
}

fn count_of(counters: &[(String, u64)], name: &str) -> u64 {
    counters
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

#[test]
fn test_issuance_and_validation_counters() {
    let recorder = DebuggingRecorder::new();
    let service = test_token_service(0).unwrap();

    metrics::with_local_recorder(&recorder, || {
        let token = service.issue_token_at(&alice(), TEST_NOW).unwrap();
        assert!(service.validate_token_at(&token, TEST_NOW));
        assert!(!service.validate_token_at(&token, TEST_NOW + 3600));
        assert!(!service.validate_token_at("garbage", TEST_NOW));
    });

    let counters = counters(&recorder);
    assert_eq!(count_of(&counters, "auth_token_issuance_total{status=success}"), 1);
    assert_eq!(
        count_of(&counters, "auth_token_validations_total{outcome=valid,status=success}"),
        1
    );
    assert_eq!(
        count_of(&counters, "auth_token_validations_total{outcome=expired,status=error}"),
        1
    );
    assert_eq!(
        count_of(&counters, "auth_token_validations_total{outcome=malformed,status=error}"),
        1
    );
}

#[test]
fn test_failed_issuance_records_error_category() {
    let recorder = DebuggingRecorder::new();
    let service = test_token_service(0).unwrap();

    metrics::with_local_recorder(&recorder, || {
        assert!(service
            .issue_token_at(&Principal::authenticated(""), TEST_NOW)
            .is_err());
    });

    let counters = counters(&recorder);
    assert_eq!(count_of(&counters, "auth_token_issuance_total{status=error}"), 1);
    assert_eq!(
        count_of(&counters, "auth_errors_total{error_category=input,operation=issue_token}"),
        1
    );
}

#[test]
fn test_validation_labels_never_contain_subject() {
    let recorder = DebuggingRecorder::new();
    let service = test_token_service(0).unwrap();

    metrics::with_local_recorder(&recorder, || {
        let token = service.issue_token_at(&alice(), TEST_NOW).unwrap();
        let _ = service.extract_identity_at(&token, TEST_NOW);
    });

    for (key, _) in counters(&recorder) {
        assert!(
            !key.contains(TEST_IDENTITY_ALICE),
            "metric key {key} leaks the subject"
        );
    }
}
