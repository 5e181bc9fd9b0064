//! Label evaluation.
//!
//! Two-phase algorithm over the request's label map:
//! 1. Per-label pass: a denied key rejects immediately; a constrained key
//!    whose value does not match its pattern rejects immediately.
//! 2. Completeness pass: every constrained key must be present on the
//!    resource.
//!
//! Labels are visited in sorted key order, so when several labels violate
//! the rules the reported violation is always the lexicographically first
//! one.

use super::Decision;
use crate::log::PolicyLog;
use crate::request::ResourceView;
use crate::settings::Settings;

/// Evaluate a resource's labels against the rule set.
///
/// Expects a rule set that already passed [`Settings::check`]; never fails.
pub fn evaluate(settings: &Settings, resource: &ResourceView, log: &dyn PolicyLog) -> Decision {
    for (key, value) in resource.labels() {
        log.debug(&format!("checking label {key}={value}"));

        if settings.denied_labels.contains(key) {
            log.warn(&format!("label {key} is denied"));
            return Decision::reject(format!("label {key} is on the deny list"));
        }

        if let Some(pattern) = settings.constrained_labels.get(key) {
            if !pattern.is_match(value) {
                log.warn(&format!(
                    "label {key}={value} does not match constraint {}",
                    pattern.as_str()
                ));
                return Decision::reject(format!(
                    "the value of {key} doesn't pass the user-defined constraint"
                ));
            }
        }
    }

    // Constrained labels are implicitly required to be present.
    for required in settings.constrained_labels.keys() {
        if !resource.labels().contains_key(required) {
            log.warn(&format!("required label {required} is missing"));
            return Decision::reject(format!(
                "constrained label {required} not found on the resource"
            ));
        }
    }

    log.info("labels accepted");
    Decision::accept()
}
