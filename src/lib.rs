//! labelguard - an admission-control policy evaluator.
//!
//! Given one candidate resource change and an operator-supplied rule set,
//! the evaluator produces a binary accept/reject decision. Two entry points
//! cross the host boundary, each bytes in / bytes out:
//!
//! - [`protocol::validate_settings`]: parse a rule set and check it for
//!   internal consistency (a key cannot be denied and constrained at the
//!   same time).
//! - [`protocol::validate`]: decode one admission request and evaluate its
//!   labels against the rule set.
//!
//! A second policy variant checks the resource name against a flat deny
//! list ([`protocol::validate_names`]).
//!
//! The crate is transport-agnostic: the host that carries payloads in and
//! out (webhook server, WASM runtime) lives elsewhere. Each evaluation is a
//! pure, bounded function of its two inputs; the rule set is immutable once
//! validated and is replaced wholesale on configuration updates.

pub mod error;
pub mod log;
pub mod policies;
pub mod protocol;
pub mod request;
pub mod settings;

pub use error::Error;
pub use log::{NoopLog, PolicyLog, TracingLog};
pub use policies::Decision;
pub use protocol::{validate, validate_name_settings, validate_names, validate_settings};
pub use request::{AdmissionRequest, ResourceView, ValidationRequest};
pub use settings::{NameSettings, Pattern, Settings};
