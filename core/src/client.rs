//! JSON API client with pluggable request, response and exception filters.
//!
//! # Design
//! `ApiClient` holds a `base_url`, a transport and three filter chains. Every
//! call builds its own `HttpRequest` and runs it through the same pipeline:
//! request filters, one transport exchange, then either the response
//! filters (2xx) or the exception filters (non-2xx status or transport
//! failure). Exactly one of the two paths runs per call.
//!
//! Filters are registered through `&mut self`, so the chains cannot change
//! while a call holding `&self` is in flight.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::chain::{ExceptionChain, RequestChain, ResponseChain};
use crate::config::ClientConfig;
use crate::error::{ClientError, Failure};
use crate::filters::{default_content_type, json_response};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Options, Reply, RequestKind};

/// Asynchronous client for a single JSON API endpoint.
///
/// The default content-type filter and JSON response filter are registered
/// at construction, so user request filters run after the `Accept` and
/// `Content-Type` headers are set and user response filters see parsed
/// JSON bodies.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    request_filters: RequestChain,
    response_filters: ResponseChain,
    exception_filters: ExceptionChain,
}

impl ApiClient {
    /// Client using the default ureq transport.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_transport(base_url, Arc::new(UreqTransport::new()))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url)
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::EmptyBaseUrl);
        }

        let mut request_filters = RequestChain::default();
        request_filters.push(default_content_type);
        let mut response_filters = ResponseChain::default();
        response_filters.push(json_response);

        Ok(Self {
            base_url: base_url.to_string(),
            transport,
            request_filters,
            response_filters,
            exception_filters: ExceptionChain::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append a request filter. It runs after every filter registered before it.
    pub fn add_request_filter<F>(&mut self, filter: F)
    where
        F: Fn(HttpRequest, &Options) -> Option<HttpRequest> + Send + Sync + 'static,
    {
        self.request_filters.push(filter);
    }

    /// Append a response filter. It runs after every filter registered before it.
    pub fn add_response_filter<F>(&mut self, filter: F)
    where
        F: Fn(Reply, &HttpRequest, &Options) -> Result<Option<Reply>, ClientError> + Send + Sync + 'static,
    {
        self.response_filters.push(filter);
    }

    /// Register an exception filter. It is consulted before every filter
    /// registered earlier; returning `None` passes the failure on.
    pub fn add_exception_filter<F>(&mut self, filter: F)
    where
        F: Fn(&Failure, &HttpRequest, &Options) -> Option<Reply> + Send + Sync + 'static,
    {
        self.exception_filters.push(filter);
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> Result<String, ClientError> {
        if path.is_empty() {
            return Err(ClientError::EmptyUrl);
        }
        if path.starts_with('/') {
            Ok(format!("{}{path}", self.base_url))
        } else {
            Ok(format!("{}/{path}", self.base_url))
        }
    }

    pub async fn get(&self, path: &str, options: Options) -> Result<Reply, ClientError> {
        self.request::<()>(HttpMethod::Get, path, None, options).await
    }

    pub async fn post<T>(&self, path: &str, data: Option<&T>, options: Options) -> Result<Reply, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, path, data, options).await
    }

    pub async fn put<T>(&self, path: &str, data: Option<&T>, options: Options) -> Result<Reply, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, path, data, options).await
    }

    pub async fn delete(&self, path: &str, options: Options) -> Result<Reply, ClientError> {
        self.request::<()>(HttpMethod::Delete, path, None, options).await
    }

    /// Build a JSON request for `path` and run it through [`Self::invoke`].
    ///
    /// `options` is always switched to JSON mode; `data`, when present, is
    /// serialized into the request body.
    pub async fn request<T>(
        &self,
        method: HttpMethod,
        path: &str,
        data: Option<&T>,
        mut options: Options,
    ) -> Result<Reply, ClientError>
    where
        T: Serialize + ?Sized,
    {
        options.kind = Some(RequestKind::Json);

        let mut request = HttpRequest::new(method, self.url(path)?);
        if let Some(data) = data {
            request.body = Some(serde_json::to_string(data).map_err(ClientError::Serialization)?);
        }
        self.invoke(request, &options).await
    }

    /// Run a prepared request through the filter pipeline.
    ///
    /// The transport receives the request exactly as the request filters
    /// emitted it, and the same request is handed to the response or
    /// exception filters.
    pub async fn invoke(&self, request: HttpRequest, options: &Options) -> Result<Reply, ClientError> {
        if request.url.is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        let Some(request) = self.request_filters.apply(request, options) else {
            tracing::warn!("request filter chain returned no request");
            return Err(ClientError::RequestFilter);
        };

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let failure = match self.transport.fetch(&request).await {
            Ok(response) if response.is_ok() => {
                return self.on_success(response, &request, options);
            }
            Ok(response) => {
                tracing::debug!(status = response.status, url = %request.url, "request failed with status");
                Failure::Status(response)
            }
            Err(err) => {
                tracing::debug!(error = %err, url = %request.url, "transport failed");
                Failure::Transport(err)
            }
        };
        self.on_failure(failure, &request, options)
    }

    fn on_success(
        &self,
        response: HttpResponse,
        request: &HttpRequest,
        options: &Options,
    ) -> Result<Reply, ClientError> {
        tracing::debug!(status = response.status, url = %request.url, "request succeeded");
        match self.response_filters.apply(Reply::Raw(response), request, options)? {
            Some(reply) => Ok(reply),
            None => {
                tracing::warn!(url = %request.url, "response filter chain returned no value");
                Err(ClientError::ResponseFilter)
            }
        }
    }

    fn on_failure(&self, failure: Failure, request: &HttpRequest, options: &Options) -> Result<Reply, ClientError> {
        match self.exception_filters.apply(&failure, request, options) {
            Some(reply) => {
                tracing::trace!(url = %request.url, "failure recovered by exception filter");
                Ok(reply)
            }
            None => Err(failure.into()),
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("request_filters", &self.request_filters)
            .field("response_filters", &self.response_filters)
            .field("exception_filters", &self.exception_filters)
            .finish_non_exhaustive()
    }
}
