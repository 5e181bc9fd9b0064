// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Functional tests for labelguard.
//!
//! These tests exercise the host-boundary entry points end to end: they
//! build raw JSON payloads the way a policy host would, call the wire
//! functions, and decode the byte responses.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run a specific test
//! cargo test --test functional test_denied_label_is_rejected
//! ```

use labelguard::protocol::{SettingsValidationResponse, ValidationResponse};
use labelguard::{NoopLog, validate, validate_names, validate_settings};

/// Build a validation payload from pod labels and policy settings.
fn build_payload(name: &str, labels: &[(&str, &str)], settings: serde_json::Value) -> Vec<u8> {
    let labels: serde_json::Map<String, serde_json::Value> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();

    serde_json::json!({
        "request": {
            "uid": "1299d386-525b-4032-98ae-1949f69f9cfc",
            "operation": "CREATE",
            "kind": { "group": "", "version": "v1", "kind": "Pod" },
            "object": {
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {
                    "name": name,
                    "namespace": "default",
                    "labels": labels
                },
                "spec": { "containers": [] }
            }
        },
        "settings": settings
    })
    .to_string()
    .into_bytes()
}

fn run_validate(payload: &[u8]) -> ValidationResponse {
    serde_json::from_slice(&validate(payload, &NoopLog).unwrap()).unwrap()
}

fn run_validate_settings(payload: &[u8]) -> SettingsValidationResponse {
    serde_json::from_slice(&validate_settings(payload).unwrap()).unwrap()
}

#[test]
fn test_label_policy_scenarios() {
    struct Case {
        pod_labels: &'static [(&'static str, &'static str)],
        denied_labels: &'static [&'static str],
        constrained_labels: &'static [(&'static str, &'static str)],
        expected_accept: bool,
    }

    let cases = [
        // Pod has no labels
        Case {
            pod_labels: &[],
            denied_labels: &["owner"],
            constrained_labels: &[],
            expected_accept: true,
        },
        // Pod has labels, none is denied
        Case {
            pod_labels: &[("hello", "world")],
            denied_labels: &["owner"],
            constrained_labels: &[],
            expected_accept: true,
        },
        // Pod has labels, one is denied
        Case {
            pod_labels: &[("hello", "world")],
            denied_labels: &["hello"],
            constrained_labels: &[],
            expected_accept: false,
        },
        // Constraint is respected
        Case {
            pod_labels: &[("cc-center", "team-123")],
            denied_labels: &["hello"],
            constrained_labels: &[("cc-center", r"team-\d+")],
            expected_accept: true,
        },
        // Constraint is violated
        Case {
            pod_labels: &[("cc-center", "team-kubewarden")],
            denied_labels: &["hello"],
            constrained_labels: &[("cc-center", r"team-\d+")],
            expected_accept: false,
        },
        // Constrained label is missing from the pod
        Case {
            pod_labels: &[("owner", "team-kubewarden")],
            denied_labels: &["hello"],
            constrained_labels: &[("cc-center", r"team-\d+")],
            expected_accept: false,
        },
    ];

    for (i, case) in cases.iter().enumerate() {
        let settings = serde_json::json!({
            "denied_labels": case.denied_labels,
            "constrained_labels": case
                .constrained_labels
                .iter()
                .cloned()
                .collect::<std::collections::BTreeMap<_, _>>(),
        });

        let response = run_validate(&build_payload("test-pod", case.pod_labels, settings));
        assert_eq!(
            response.accepted, case.expected_accept,
            "case {i}: pod labels {:?}, denied {:?}, constrained {:?}, message {:?}",
            case.pod_labels, case.denied_labels, case.constrained_labels, response.message
        );
        if case.expected_accept {
            assert!(response.message.is_none(), "case {i}");
        } else {
            assert!(response.message.is_some(), "case {i}");
            assert!(response.code.is_none(), "case {i}: rule violations carry no code");
        }
    }
}

#[test]
fn test_denied_label_is_rejected() {
    let settings = serde_json::json!({ "denied_labels": [ "hello" ] });
    let response = run_validate(&build_payload("test-pod", &[("hello", "world")], settings));

    assert!(!response.accepted);
    let message = response.message.unwrap();
    assert!(message.contains("hello"), "got: {message}");
    assert!(message.contains("deny list"), "got: {message}");
}

#[test]
fn test_constraint_mismatch_message_names_the_label() {
    let settings = serde_json::json!({
        "denied_labels": [ "hello" ],
        "constrained_labels": { "cc-center": r"team-\d+" }
    });
    let response = run_validate(&build_payload(
        "test-pod",
        &[("cc-center", "team-kubewarden")],
        settings,
    ));

    assert!(!response.accepted);
    assert!(response.message.unwrap().contains("cc-center"));
}

#[test]
fn test_missing_constrained_label_message_names_the_label() {
    let settings = serde_json::json!({
        "denied_labels": [ "hello" ],
        "constrained_labels": { "cc-center": r"team-\d+" }
    });
    let response = run_validate(&build_payload(
        "test-pod",
        &[("owner", "team-kubewarden")],
        settings,
    ));

    assert!(!response.accepted);
    let message = response.message.unwrap();
    assert!(message.contains("cc-center"), "got: {message}");
    assert!(message.contains("not found"), "got: {message}");
}

#[test]
fn test_malformed_envelope_is_rejected_with_400() {
    let response = run_validate(b"{ this is not json");
    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
    assert!(response.message.is_some());
}

#[test]
fn test_unparseable_settings_in_envelope_are_rejected_with_400() {
    let settings = serde_json::json!({ "constrained_labels": { "cc": "cc-[a+" } });
    let response = run_validate(&build_payload("test-pod", &[], settings));
    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
}

#[test]
fn test_settings_conflict_is_reported_with_the_full_set() {
    let payload = serde_json::json!({
        "denied_labels": [ "foo", "bar", "cost-center" ],
        "constrained_labels": { "cost-center": ".*" }
    })
    .to_string()
    .into_bytes();

    let response = run_validate_settings(&payload);
    assert!(!response.valid);
    assert_eq!(
        response.message.as_deref(),
        Some(
            "Provided settings are not valid: these labels cannot be constrained \
             and denied at the same time: {cost-center}"
        )
    );
}

#[test]
fn test_empty_settings_are_valid() {
    let response = run_validate_settings(b"{}");
    assert!(response.valid);
    assert!(response.message.is_none());
}

#[test]
fn test_name_policy_round_trip() {
    let settings = serde_json::json!({ "denied_names": [ "default" ] });

    let denied = build_payload("default", &[], settings.clone());
    let response: ValidationResponse =
        serde_json::from_slice(&validate_names(&denied, &NoopLog).unwrap()).unwrap();
    assert!(!response.accepted);
    assert!(response.message.unwrap().contains("default"));

    let allowed = build_payload("my-app", &[], settings);
    let response: ValidationResponse =
        serde_json::from_slice(&validate_names(&allowed, &NoopLog).unwrap()).unwrap();
    assert!(response.accepted);
}
