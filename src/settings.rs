//! Operator-supplied rule sets.
//!
//! A rule set is parsed once from the settings payload, checked for
//! internal consistency, and then held immutably for the lifetime of the
//! configuration. Constraint patterns compile at parse time, so evaluation
//! never touches the regex compiler.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A constraint pattern, compiled at settings-parse time.
///
/// Deserializes from the pattern source text; a pattern that does not
/// compile makes the whole settings payload a parse error, carrying the
/// regex error detail the operator needs to fix it.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from its source text.
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// Check a label value against the compiled pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The original pattern source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(D::Error::custom)
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Label policy settings: a deny list plus per-key value constraints.
///
/// Ordered collections keep diagnostics and evaluation order deterministic
/// regardless of how the payload was written.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Label keys that must never appear, regardless of value.
    pub denied_labels: BTreeSet<String>,

    /// Label keys that must be present, with a pattern their value must
    /// match.
    pub constrained_labels: BTreeMap<String, Pattern>,
}

impl Settings {
    /// Parse settings from a raw JSON payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// Keys that are both denied and constrained.
    ///
    /// Empty for a consistent rule set. Non-empty means the configuration
    /// is contradictory: such a key could never satisfy both rules.
    pub fn conflicting_labels(&self) -> BTreeSet<String> {
        self.constrained_labels
            .keys()
            .filter(|key| self.denied_labels.contains(*key))
            .cloned()
            .collect()
    }

    /// Check the rule set for internal consistency.
    ///
    /// An empty rule set is trivially valid. The error names every
    /// conflicting key, not just the first one found.
    pub fn check(&self) -> Result<()> {
        let conflicts = self.conflicting_labels();
        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(Error::SettingsConflict(conflicts))
        }
    }
}

/// Name policy settings: a flat deny list over resource identifiers.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NameSettings {
    /// Resource names that must never be used.
    pub denied_names: BTreeSet<String>,
}

impl NameSettings {
    /// Parse settings from a raw JSON payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// A flat deny list has no cross-rule consistency to check.
    pub fn check(&self) -> Result<()> {
        Ok(())
    }
}
