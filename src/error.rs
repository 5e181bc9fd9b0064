//! Error types for the policy evaluator.
//!
//! Every error maps deterministically to a structured rejection response at
//! the host boundary; none are retried and none abort the process.

use std::collections::BTreeSet;

use thiserror::Error;

/// Error type for settings and request handling.
///
/// The decision evaluator itself never fails: a rule set that cannot be
/// parsed or that fails its consistency check is rejected here, before any
/// request is evaluated against it.
#[derive(Error, Debug)]
pub enum Error {
    /// Settings payload is not well-formed JSON, or a constraint pattern
    /// failed to compile as a regular expression.
    #[error("{0}")]
    SettingsParse(#[from] serde_json::Error),

    /// The denied and constrained rule sets overlap. Carries every
    /// offending key so the operator can fix the configuration in one pass.
    #[error("these labels cannot be constrained and denied at the same time: {}", render_keys(.0))]
    SettingsConflict(BTreeSet<String>),

    /// Inbound admission envelope could not be decoded.
    #[error("{0}")]
    RequestDecode(serde_json::Error),
}

/// Render a key set as `{a, b}` in sorted order.
fn render_keys(keys: &BTreeSet<String>) -> String {
    let mut out = String::from("{");
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(key);
    }
    out.push('}');
    out
}

/// Result type alias for settings and request handling.
pub type Result<T> = std::result::Result<T, Error>;
