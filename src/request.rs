//! Admission request envelope and the typed resource projection.
//!
//! The host delivers `{ "request": ..., "settings": ... }`. The settings
//! payload is kept raw so settings-parse failures stay distinguishable from
//! envelope-decode failures. The resource object itself is decoded only
//! into the narrow view the evaluator inspects (name, labels); the crate is
//! agnostic to which resource kind the object represents.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{Error, Result};

/// Wire envelope for one validation call.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    /// The admission request under review.
    pub request: AdmissionRequest,

    /// The operator settings to evaluate against, parsed in a second stage.
    pub settings: Box<RawValue>,
}

impl ValidationRequest {
    /// Decode an envelope from the raw payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(Error::RequestDecode)
    }
}

/// Narrow typed view of the host's admission request.
///
/// Every field defaults when absent; only `object` carries the candidate
/// resource, still raw.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdmissionRequest {
    pub uid: String,
    pub kind: GroupVersionKind,
    pub operation: String,
    pub name: String,
    pub object: Option<Box<RawValue>>,
}

impl AdmissionRequest {
    /// Project the candidate resource into the view the evaluator needs.
    ///
    /// A request without an object projects to an empty view rather than
    /// failing; an object that is present but undecodable is a decode
    /// error.
    pub fn resource_view(&self) -> Result<ResourceView> {
        match &self.object {
            Some(raw) => serde_json::from_str(raw.get()).map_err(Error::RequestDecode),
            None => Ok(ResourceView::default()),
        }
    }
}

/// Group/version/kind of the resource under review, for diagnostics.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

/// The fields of the candidate resource the evaluator inspects.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResourceView {
    metadata: ObjectMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectMeta {
    name: String,
    labels: BTreeMap<String, String>,
}

impl ResourceView {
    /// The resource name; empty if the caller has not assigned one yet.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The resource labels; empty if none are set.
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.metadata.labels
    }

    #[cfg(test)]
    pub(crate) fn for_test(name: &str, labels: &[(&str, &str)]) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.to_string(),
                labels: labels
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        }
    }
}
