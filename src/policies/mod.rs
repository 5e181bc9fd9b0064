//! Decision evaluators.
//!
//! Two variants share the same shape: `labels` checks the resource's label
//! map against a deny list plus value constraints, `names` checks the
//! resource name against a flat deny list. Both are pure functions of an
//! immutable rule set and a per-request projection, and every code path
//! terminates in a [`Decision`].

pub mod labels;
pub mod names;

/// HTTP-style code attached to malformed-input rejections.
pub const CODE_BAD_REQUEST: u16 = 400;

/// Outcome of evaluating one admission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request is admitted.
    pub accepted: bool,
    /// Reason for rejection (if not accepted).
    pub reason: Option<String>,
    /// Status code, set only for malformed-input rejections.
    pub code: Option<u16>,
}

impl Decision {
    /// Admit the request.
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
            code: None,
        }
    }

    /// Reject the request for a rule violation. No status code: the input
    /// was well-formed, it just broke a rule.
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
            code: None,
        }
    }

    /// Reject a request that could not be decoded in the first place.
    pub fn reject_bad_request(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
            code: Some(CODE_BAD_REQUEST),
        }
    }
}
