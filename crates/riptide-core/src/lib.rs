mod error;
mod registry;
mod resolve;

pub use error::{HttpError, ResponseStatusError};
pub use registry::StatusRegistry;
pub use resolve::{MAX_CAUSE_DEPTH, resolve_status};

/// Boxed error type passed along the request-handling flow
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
