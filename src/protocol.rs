//! Host-boundary entry points.
//!
//! Each entry point is a function from a byte payload to a byte payload.
//! Failures at the decode stages are encoded into the response (code 400
//! for malformed input); rule violations reject without a code. The only
//! error these functions can return is a response-serialization failure,
//! which the host treats as a policy bug.

use serde::{Deserialize, Serialize};

use crate::log::PolicyLog;
use crate::policies::{Decision, labels, names};
use crate::request::ValidationRequest;
use crate::settings::{NameSettings, Settings};

/// Byte payload handed back across the host boundary.
pub type WireResult = Result<Vec<u8>, serde_json::Error>;

/// Wire shape of a decision response.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl From<Decision> for ValidationResponse {
    fn from(decision: Decision) -> Self {
        Self {
            accepted: decision.accepted,
            message: decision.reason,
            code: decision.code,
        }
    }
}

/// Wire shape of a settings-validation response.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SettingsValidationResponse {
    fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

/// Validate a label-policy settings payload: parse, then consistency-check.
pub fn validate_settings(payload: &[u8]) -> WireResult {
    let response = match Settings::parse(payload).and_then(|settings| settings.check()) {
        Ok(()) => SettingsValidationResponse::valid(),
        Err(err) => {
            SettingsValidationResponse::invalid(format!("Provided settings are not valid: {err}"))
        }
    };
    serde_json::to_vec(&response)
}

/// Validate one admission request against the label policy.
pub fn validate(payload: &[u8], log: &dyn PolicyLog) -> WireResult {
    serde_json::to_vec(&ValidationResponse::from(label_decision(payload, log)))
}

fn label_decision(payload: &[u8], log: &dyn PolicyLog) -> Decision {
    let envelope = match ValidationRequest::decode(payload) {
        Ok(envelope) => envelope,
        Err(err) => {
            log.error(&format!("failed to decode validation request: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    let settings = match Settings::parse(envelope.settings.get().as_bytes()) {
        Ok(settings) => settings,
        Err(err) => {
            log.error(&format!("failed to parse policy settings: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    let resource = match envelope.request.resource_view() {
        Ok(resource) => resource,
        Err(err) => {
            log.error(&format!("failed to decode resource object: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    log.debug(&format!(
        "validating labels: operation={}, kind={}",
        envelope.request.operation, envelope.request.kind.kind
    ));

    labels::evaluate(&settings, &resource, log)
}

/// Validate a name-policy settings payload.
pub fn validate_name_settings(payload: &[u8]) -> WireResult {
    let response = match NameSettings::parse(payload).and_then(|settings| settings.check()) {
        Ok(()) => SettingsValidationResponse::valid(),
        Err(err) => {
            SettingsValidationResponse::invalid(format!("Provided settings are not valid: {err}"))
        }
    };
    serde_json::to_vec(&response)
}

/// Validate one admission request against the name policy.
pub fn validate_names(payload: &[u8], log: &dyn PolicyLog) -> WireResult {
    serde_json::to_vec(&ValidationResponse::from(name_decision(payload, log)))
}

fn name_decision(payload: &[u8], log: &dyn PolicyLog) -> Decision {
    let envelope = match ValidationRequest::decode(payload) {
        Ok(envelope) => envelope,
        Err(err) => {
            log.error(&format!("failed to decode validation request: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    let settings = match NameSettings::parse(envelope.settings.get().as_bytes()) {
        Ok(settings) => settings,
        Err(err) => {
            log.error(&format!("failed to parse policy settings: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    let resource = match envelope.request.resource_view() {
        Ok(resource) => resource,
        Err(err) => {
            log.error(&format!("failed to decode resource object: {err}"));
            return Decision::reject_bad_request(err.to_string());
        }
    };

    names::evaluate(&settings, &resource, log)
}
