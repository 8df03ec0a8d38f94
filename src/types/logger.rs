use std::fmt::Debug;

/// # Logger
/// Observer the clients report to. Every method defaults to doing nothing, so an
/// implementation only overrides the levels it cares about.
pub trait Logger: Debug + Send + Sync {
    /// A call failed
    fn error(&self, _message: &str) {}
    /// Something was tolerated but looks wrong
    fn warn(&self, _message: &str) {}
    /// Progress of a login
    fn info(&self, _message: &str) {}
    /// Request level detail
    fn debug(&self, _message: &str) {}
}

/// Discards everything. Used when no logger is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {}

/// Forwards messages to [tracing] under the `myinfo_client` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        tracing::error!(target: "myinfo_client", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "myinfo_client", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "myinfo_client", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "myinfo_client", "{message}");
    }
}
