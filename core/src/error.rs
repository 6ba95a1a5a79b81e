//! Error types for the API client.
//!
//! # Design
//! Unrecovered failures keep the original cause: a non-2xx response is
//! returned whole in `Status`, a transport failure in `Transport`. Filter
//! malfunctions get their own variants because they are configuration bugs
//! and never pass through the exception filters.

use thiserror::Error;

use crate::http::HttpResponse;

/// Failure raised by a [`crate::Transport`] while performing the exchange.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request descriptor could not be turned into a wire request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, DNS, TLS or I/O failure.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The worker running the exchange stopped before producing a result.
    #[error("transport worker aborted: {0}")]
    Aborted(String),
}

/// A failed exchange, as seen by exception filters.
#[derive(Debug)]
pub enum Failure {
    /// The server answered with a non-2xx status.
    Status(HttpResponse),
    /// The transport failed before a response was received.
    Transport(TransportError),
}

impl Failure {
    /// The failed response, if the server answered at all.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Failure::Status(response) => Some(response),
            Failure::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }
}

/// Errors returned by `ApiClient` calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The client was constructed with an empty base URL.
    #[error("base url could not be empty")]
    EmptyBaseUrl,

    /// A call was made with an empty path or request url.
    #[error("url could not be empty")]
    EmptyUrl,

    /// The request filter chain did not return a request.
    #[error("request filter did not return a valid request")]
    RequestFilter,

    /// The response filter chain did not return a value.
    #[error("response filter did not return a valid response")]
    ResponseFilter,

    /// The server returned a non-2xx status no exception filter recovered.
    #[error("HTTP {}: {}", .0.status, .0.text_lossy())]
    Status(HttpResponse),

    /// The transport failed and no exception filter recovered.
    #[error(transparent)]
    Transport(TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A response body could not be deserialized.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl From<Failure> for ClientError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Status(response) => ClientError::Status(response),
            Failure::Transport(err) => ClientError::Transport(err),
        }
    }
}
