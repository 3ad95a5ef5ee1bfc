use std::error::Error;
use std::fmt;

use http::StatusCode;

use crate::HttpError;

type Probe = Box<dyn Fn(&(dyn Error + 'static)) -> Option<StatusCode> + Send + Sync>;

/// Maps concrete error types to HTTP status codes
///
/// Built once at startup, then shared immutably (typically behind an `Arc`)
/// with every handler that needs status resolution. Probes are tried in
/// registration order and the first match wins.
#[derive(Default)]
pub struct StatusRegistry {
    probes: Vec<Probe>,
}

impl StatusRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an error type that knows its own status
    ///
    /// The status is asked of the instance at resolution time, so enum
    /// variants with differing codes are honored.
    #[must_use]
    pub fn register<E>(mut self) -> Self
    where
        E: HttpError + 'static,
    {
        self.probes
            .push(Box::new(|err| err.downcast_ref::<E>().map(HttpError::status_code)));
        self
    }

    /// Register a fixed status for a foreign error type
    ///
    /// For error types outside this codebase that cannot implement
    /// [`HttpError`] themselves.
    #[must_use]
    pub fn register_status<E>(mut self, status: StatusCode) -> Self
    where
        E: Error + 'static,
    {
        self.probes.push(Box::new(move |err| err.is::<E>().then_some(status)));
        self
    }

    /// Look up the status for a single error value
    ///
    /// Checks the value's concrete type only; walking a cause chain is the
    /// job of [`resolve_status`](crate::resolve_status).
    #[must_use]
    pub fn find_status(&self, err: &(dyn Error + 'static)) -> Option<StatusCode> {
        self.probes.iter().find_map(|probe| probe(err))
    }

    /// Number of registered probes
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Whether no probes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl fmt::Debug for StatusRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusRegistry").field("probes", &self.probes.len()).finish()
    }
}
