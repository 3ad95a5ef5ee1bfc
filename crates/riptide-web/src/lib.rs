mod chain;
mod exchange;
mod log;
mod status_handler;

pub use chain::{ErrorHandlingHandler, WebHandler};
pub use exchange::{ServerExchange, ServerResponse};
pub use log::{ErrorLog, TracingLog};
pub use riptide_core::BoxError;
pub use status_handler::{ResponseStatusHandler, WebErrorHandler};
