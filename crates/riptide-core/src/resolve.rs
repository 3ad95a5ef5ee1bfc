use std::error::Error;

use http::StatusCode;

use crate::{ResponseStatusError, StatusRegistry};

/// Maximum number of cause links examined during status resolution
///
/// Cause chains are expected to be acyclic, but a buggy wrapper that makes an
/// error its own indirect cause would otherwise loop forever. Past this depth
/// resolution gives up and reports no status.
pub const MAX_CAUSE_DEPTH: usize = 16;

/// Resolve the HTTP status for an error, walking its cause chain
///
/// Each link is checked in order: an explicit [`ResponseStatusError`] yields
/// its embedded status; otherwise the registry is consulted for the link's
/// concrete type; otherwise resolution moves on to the link's source. Returns
/// `None` when the chain ends (or exceeds [`MAX_CAUSE_DEPTH`]) without a
/// match.
///
/// Pure read of the error chain. No logging, no mutation.
#[must_use]
pub fn resolve_status(err: &(dyn Error + 'static), registry: &StatusRegistry) -> Option<StatusCode> {
    let mut current = err;
    for _ in 0..MAX_CAUSE_DEPTH {
        if let Some(status_err) = current.downcast_ref::<ResponseStatusError>() {
            return Some(status_err.status());
        }
        if let Some(status) = registry.find_status(current) {
            return Some(status);
        }
        current = current.source()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::*;
    use crate::{BoxError, HttpError};

    #[derive(Debug, Error)]
    #[error("task failed: {source}")]
    struct TaskError {
        #[source]
        source: BoxError,
    }

    fn wrap(err: BoxError) -> BoxError {
        Box::new(TaskError { source: err })
    }

    #[derive(Debug, Error)]
    #[error("quota exhausted")]
    struct QuotaError;

    impl HttpError for QuotaError {
        fn status_code(&self) -> StatusCode {
            StatusCode::TOO_MANY_REQUESTS
        }
    }

    #[test]
    fn explicit_status_wins() {
        let registry = StatusRegistry::new();
        let err = ResponseStatusError::new(StatusCode::SERVICE_UNAVAILABLE);

        assert_eq!(resolve_status(&err, &registry), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn registered_type_resolves() {
        let registry = StatusRegistry::new().register::<QuotaError>();

        assert_eq!(resolve_status(&QuotaError, &registry), Some(StatusCode::TOO_MANY_REQUESTS));
    }

    #[test]
    fn status_found_through_cause_chain() {
        let registry = StatusRegistry::new();
        let inner = ResponseStatusError::new(StatusCode::NOT_FOUND);
        let outer = wrap(wrap(Box::new(inner)));

        assert_eq!(resolve_status(outer.as_ref(), &registry), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn registered_cause_resolves() {
        let registry = StatusRegistry::new().register::<QuotaError>();
        let outer = wrap(Box::new(QuotaError));

        assert_eq!(resolve_status(outer.as_ref(), &registry), Some(StatusCode::TOO_MANY_REQUESTS));
    }

    #[test]
    fn unresolvable_chain_is_none() {
        let registry = StatusRegistry::new();
        let outer = wrap(Box::new(std::io::Error::other("broken pipe")));

        assert_eq!(resolve_status(outer.as_ref(), &registry), None);
    }

    #[test]
    fn resolution_stops_at_depth_cap() {
        let registry = StatusRegistry::new();

        let mut shallow: BoxError = Box::new(ResponseStatusError::new(StatusCode::GONE));
        for _ in 0..(MAX_CAUSE_DEPTH - 1) {
            shallow = wrap(shallow);
        }
        assert_eq!(resolve_status(shallow.as_ref(), &registry), Some(StatusCode::GONE));

        let mut deep: BoxError = Box::new(ResponseStatusError::new(StatusCode::GONE));
        for _ in 0..MAX_CAUSE_DEPTH {
            deep = wrap(deep);
        }
        assert_eq!(resolve_status(deep.as_ref(), &registry), None);
    }
}
