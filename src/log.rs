//! Observability collaborator for the evaluator.
//!
//! The host decides where diagnostics go: the evaluator only sees a
//! [`PolicyLog`] passed in by its caller, never a process-wide singleton.

/// Logging interface injected into the evaluator's callers.
pub trait PolicyLog {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// [`PolicyLog`] backed by the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl PolicyLog for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// [`PolicyLog`] that discards everything. Useful for embedding the
/// evaluator where diagnostics are unwanted, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl PolicyLog for NoopLog {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
