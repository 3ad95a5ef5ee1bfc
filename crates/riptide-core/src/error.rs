use std::fmt;

use http::StatusCode;

use crate::BoxError;

/// Trait for domain errors that map to an HTTP response status
///
/// Implemented by each concrete error type a service raises. The status may
/// depend on the variant, not just the type, so an enum can spread its
/// variants across several status codes. Registering an implementor with a
/// [`StatusRegistry`](crate::StatusRegistry) makes the mapping visible to
/// status resolution over boxed errors.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;
}

/// Error carrying an explicit HTTP status
///
/// The general-purpose way to fail a request with a chosen status without
/// defining a dedicated error type. Resolution recognizes it anywhere in a
/// cause chain, with no registration required.
#[derive(Debug)]
pub struct ResponseStatusError {
    status: StatusCode,
    reason: Option<String>,
    source: Option<BoxError>,
}

impl ResponseStatusError {
    /// Create an error with the given status and no reason
    #[must_use]
    pub const fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            source: None,
        }
    }

    /// Create an error with a status and a human-readable reason
    #[must_use]
    pub fn with_reason(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: Some(reason.into()),
            source: None,
        }
    }

    /// Create an error with a status and an underlying cause
    #[must_use]
    pub fn with_source(status: StatusCode, source: BoxError) -> Self {
        Self {
            status,
            reason: None,
            source: Some(source),
        }
    }

    /// The embedded status code
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason, if one was provided
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for ResponseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(ref reason) => write!(f, "{}: {reason}", self.status),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ResponseStatusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

impl HttpError for ResponseStatusError {
    fn status_code(&self) -> StatusCode {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_reason() {
        let err = ResponseStatusError::new(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn display_with_reason() {
        let err = ResponseStatusError::with_reason(StatusCode::BAD_REQUEST, "missing body");
        assert_eq!(err.to_string(), "400 Bad Request: missing body");
    }

    #[test]
    fn source_is_exposed() {
        let cause = std::io::Error::other("disk on fire");
        let err = ResponseStatusError::with_source(StatusCode::SERVICE_UNAVAILABLE, Box::new(cause));

        let source = std::error::Error::source(&err).expect("source present");
        assert_eq!(source.to_string(), "disk on fire");
    }
}
