//! Network transport used by the client for the actual HTTP exchange.
//!
//! # Design
//! The client only needs one operation: send a request descriptor and get a
//! response descriptor back. `Transport` captures that so tests can script
//! responses and applications can plug in their own HTTP stack.
//! `UreqTransport` is the default: a blocking ureq agent run on tokio's
//! blocking pool so the async pipeline never stalls a runtime worker.

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

/// Performs a single HTTP exchange.
///
/// Non-2xx statuses are responses, not errors. `Err` is reserved for
/// failures that produced no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by a ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx must come back as data so the exception filters see them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| TransportError::Aborted(e.to_string()))?
    }
}

/// Execute `request` with ureq and convert the answer into an `HttpResponse`.
fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = ureq::http::Request::builder()
        .method(to_ureq_method(request.method))
        .uri(request.url.as_str());
    for (name, value) in request.headers.iter() {
        builder = builder.header(name, value);
    }

    let result = match request.body {
        Some(body) => builder
            .body(body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
            .and_then(|req| agent.run(req).map_err(network)),
        None => builder
            .body(())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
            .and_then(|req| agent.run(req).map_err(network)),
    };
    let mut response = result?;

    let status = response.status().as_u16();
    let headers = response_headers(response.headers());
    let body = response.body_mut().read_to_vec().map_err(network)?;

    Ok(HttpResponse { status, headers, body })
}

/// Copy wire headers, keeping values that are not valid UTF-8 in lossy form.
fn response_headers(map: &ureq::http::HeaderMap) -> Headers {
    map.iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn to_ureq_method(method: HttpMethod) -> ureq::http::Method {
    match method {
        HttpMethod::Get => ureq::http::Method::GET,
        HttpMethod::Post => ureq::http::Method::POST,
        HttpMethod::Put => ureq::http::Method::PUT,
        HttpMethod::Delete => ureq::http::Method::DELETE,
    }
}

fn network(err: ureq::Error) -> TransportError {
    TransportError::Network(Box::new(err))
}
