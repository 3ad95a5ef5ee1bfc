use std::sync::Arc;

use async_trait::async_trait;
use riptide_core::BoxError;

use crate::exchange::ServerExchange;
use crate::status_handler::WebErrorHandler;

/// One request-processing step that may fail
#[async_trait]
pub trait WebHandler: Send + Sync {
    /// Process the exchange
    ///
    /// # Errors
    ///
    /// Returns whatever error the step raises; the serving layer routes it
    /// through the error-handling chain.
    async fn handle(&self, exchange: &ServerExchange) -> Result<(), BoxError>;
}

/// Decorates a [`WebHandler`] with an ordered error-handling chain
///
/// On delegate failure the error is offered to each error handler in turn;
/// the first one to handle it wins. If every handler propagates, the error
/// surfaces to the caller for whatever fallback the serving layer applies.
pub struct ErrorHandlingHandler<H> {
    delegate: H,
    error_handlers: Vec<Arc<dyn WebErrorHandler>>,
}

impl<H: WebHandler> ErrorHandlingHandler<H> {
    /// Wrap a handler with the given error-handling chain
    #[must_use]
    pub fn new(delegate: H, error_handlers: Vec<Arc<dyn WebErrorHandler>>) -> Self {
        Self {
            delegate,
            error_handlers,
        }
    }
}

impl<H: std::fmt::Debug> std::fmt::Debug for ErrorHandlingHandler<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandlingHandler")
            .field("delegate", &self.delegate)
            .field("error_handlers", &self.error_handlers.len())
            .finish()
    }
}

#[async_trait]
impl<H: WebHandler> WebHandler for ErrorHandlingHandler<H> {
    async fn handle(&self, exchange: &ServerExchange) -> Result<(), BoxError> {
        let Err(mut err) = self.delegate.handle(exchange).await else {
            return Ok(());
        };
        for handler in &self.error_handlers {
            match handler.handle(exchange, err).await {
                Ok(()) => return Ok(()),
                Err(unresolved) => err = unresolved,
            }
        }
        Err(err)
    }
}
