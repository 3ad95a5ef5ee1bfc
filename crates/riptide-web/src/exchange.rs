use std::sync::{Arc, Mutex, PoisonError};

use http::{Method, StatusCode, Uri};
use tokio_util::sync::CancellationToken;

/// Paired request/response context for one HTTP interaction
///
/// Owned by the serving layer for the lifetime of one request and handed to
/// every handler in the processing flow. Cheap to clone; clones share the
/// same response state.
#[derive(Debug, Clone)]
pub struct ServerExchange {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    method: Method,
    uri: Uri,
    response: ServerResponse,
}

impl ServerExchange {
    /// Create an exchange for the given request line
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            inner: Arc::new(Inner {
                method,
                uri,
                response: ServerResponse::new(),
            }),
        }
    }

    /// Create an exchange from decomposed request parts
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }

    /// Request method
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    /// Request URI
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.inner.uri
    }

    /// The mutable response side of the exchange
    #[must_use]
    pub fn response(&self) -> &ServerResponse {
        &self.inner.response
    }
}

/// Mutable response state for an in-flight exchange
///
/// Status and commit state live under one lock so a status write and the
/// completion that follows are seen together by anything reading the
/// exchange afterwards.
#[derive(Debug)]
pub struct ServerResponse {
    state: Mutex<ResponseState>,
    done: CancellationToken,
}

#[derive(Debug, Default)]
struct ResponseState {
    status: Option<StatusCode>,
    committed: bool,
}

impl ServerResponse {
    fn new() -> Self {
        Self {
            state: Mutex::new(ResponseState::default()),
            done: CancellationToken::new(),
        }
    }

    /// Set the response status
    ///
    /// Returns `false`, leaving the status untouched, once the response has
    /// begun transmitting.
    #[must_use = "a false return means the response is committed and unchanged"]
    pub fn set_status_code(&self, status: StatusCode) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.committed {
            return false;
        }
        state.status = Some(status);
        true
    }

    /// The status set so far, if any
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).status
    }

    /// Mark the response as having begun transmitting
    ///
    /// After this the status line can no longer change.
    pub fn set_committed(&self) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).committed = true;
    }

    /// Whether the response has begun transmitting
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).committed
    }

    /// Finalize the response with no body
    ///
    /// Commits the response and wakes everything waiting on [`completed`].
    ///
    /// [`completed`]: Self::completed
    pub fn set_complete(&self) {
        self.set_committed();
        self.done.cancel();
    }

    /// Whether the response has been finalized
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Completion signal: resolves once the response is finalized
    pub async fn completed(&self) {
        self.done.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange() -> ServerExchange {
        ServerExchange::new(Method::GET, Uri::from_static("/things/42"))
    }

    #[test]
    fn status_is_mutable_until_committed() {
        let exchange = exchange();
        assert!(exchange.response().set_status_code(StatusCode::NOT_FOUND));
        assert_eq!(exchange.response().status_code(), Some(StatusCode::NOT_FOUND));

        exchange.response().set_committed();
        assert!(!exchange.response().set_status_code(StatusCode::OK));
        assert_eq!(exchange.response().status_code(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn complete_commits() {
        let exchange = exchange();
        exchange.response().set_complete();
        assert!(exchange.response().is_committed());
        assert!(exchange.response().is_complete());
    }

    #[tokio::test]
    async fn completion_signal_fires() {
        let exchange = exchange();
        let waiter = exchange.clone();
        let wait = tokio::spawn(async move { waiter.response().completed().await });

        exchange.response().set_complete();
        wait.await.expect("waiter finished");

        // Resolves immediately once already complete
        exchange.response().completed().await;
    }

    #[test]
    fn clones_share_response_state() {
        let exchange = exchange();
        let clone = exchange.clone();
        assert!(clone.response().set_status_code(StatusCode::ACCEPTED));
        assert_eq!(exchange.response().status_code(), Some(StatusCode::ACCEPTED));
    }
}
