use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use riptide_core::{BoxError, StatusRegistry, resolve_status};

use crate::exchange::ServerExchange;
use crate::log::{ErrorLog, TracingLog};

/// One link in the error-handling chain for failed requests
#[async_trait]
pub trait WebErrorHandler: Send + Sync {
    /// Attempt to turn the error into a finished response
    ///
    /// # Errors
    ///
    /// Returns the original error, unchanged, when this handler does not
    /// handle it; the chain then offers it to the next handler.
    async fn handle(&self, exchange: &ServerExchange, err: BoxError) -> Result<(), BoxError>;
}

/// Handles errors that resolve to an HTTP status by writing that status and
/// finishing the response with an empty body
///
/// Resolution covers explicit [`riptide_core::ResponseStatusError`] values,
/// registered error types, and the cause chain of either. If the response is
/// already committed the error remains unresolved and is propagated.
pub struct ResponseStatusHandler {
    registry: Arc<StatusRegistry>,
    log: Arc<dyn ErrorLog>,
}

impl ResponseStatusHandler {
    /// Create a handler logging through `tracing`
    #[must_use]
    pub fn new(registry: Arc<StatusRegistry>) -> Self {
        Self::with_log(registry, Arc::new(TracingLog))
    }

    /// Create a handler with an injected log
    #[must_use]
    pub fn with_log(registry: Arc<StatusRegistry>, log: Arc<dyn ErrorLog>) -> Self {
        Self { registry, log }
    }

    fn log_handled(&self, status: StatusCode, exchange: &ServerExchange, err: &BoxError) {
        let message = format!(
            "Failed to handle request [{} {}]: {err}",
            exchange.method(),
            exchange.uri()
        );
        if status.is_server_error() {
            self.log.error(&message);
        } else if status == StatusCode::BAD_REQUEST {
            self.log.warn(&message);
        } else {
            self.log.trace(&message);
        }
    }
}

impl std::fmt::Debug for ResponseStatusHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStatusHandler")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WebErrorHandler for ResponseStatusHandler {
    async fn handle(&self, exchange: &ServerExchange, err: BoxError) -> Result<(), BoxError> {
        let Some(status) = resolve_status(err.as_ref(), &self.registry) else {
            return Err(err);
        };
        if !exchange.response().set_status_code(status) {
            return Err(err);
        }
        self.log_handled(status, exchange, &err);
        exchange.response().set_complete();
        Ok(())
    }
}
