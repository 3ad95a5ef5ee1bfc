/// Logging capability used by error handlers
///
/// Injected rather than reached for globally so tests can assert the exact
/// severity a handler chose.
pub trait ErrorLog: Send + Sync {
    /// Log at error severity
    fn error(&self, message: &str);
    /// Log at warn severity
    fn warn(&self, message: &str);
    /// Log at trace severity
    fn trace(&self, message: &str);
}

/// [`ErrorLog`] backed by the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl ErrorLog for TracingLog {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn trace(&self, message: &str) {
        tracing::trace!("{message}");
    }
}
