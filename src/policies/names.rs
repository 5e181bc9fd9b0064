//! Name evaluation.
//!
//! The identifier variant of the evaluator: the rule set is a flat deny
//! list over resource names. A request without a name is accepted, since
//! there is nothing to check until the cluster assigns one.

use super::Decision;
use crate::log::PolicyLog;
use crate::request::ResourceView;
use crate::settings::NameSettings;

/// Evaluate a resource's name against the deny list. Never fails.
pub fn evaluate(settings: &NameSettings, resource: &ResourceView, log: &dyn PolicyLog) -> Decision {
    let name = resource.name();
    if name.is_empty() {
        log.debug("resource has no name yet, nothing to check");
        return Decision::accept();
    }

    if settings.denied_names.contains(name) {
        log.warn(&format!("name {name} is denied"));
        return Decision::reject(format!("the '{name}' name is on the deny list"));
    }

    log.info(&format!("name {name} accepted"));
    Decision::accept()
}
