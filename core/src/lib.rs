//! Asynchronous JSON API client built around composable filter chains.
//!
//! # Overview
//! `ApiClient` wraps a single HTTP exchange in three pipelines: request
//! filters rewrite the outgoing request, response filters transform
//! successful replies, and exception filters get a chance to recover
//! non-2xx responses and transport failures. Two filters come
//! pre-registered: JSON requests get `Content-Type`/`Accept` headers, and
//! JSON responses are parsed into `serde_json::Value`.
//!
//! # Design
//! - Request and response filters run in registration order; exception
//!   filters run newest first and the first one to return a value wins.
//! - The transport is a trait object, so tests script responses in memory
//!   and applications can bring their own HTTP stack. `UreqTransport` is the
//!   default.
//! - Unrecovered failures carry the original response or transport error.
//!
//! ```no_run
//! use apiclient_core::{ApiClient, Options, Reply};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), apiclient_core::ClientError> {
//! let mut client = ApiClient::new("http://localhost:3000/api")?;
//! client.add_request_filter(|mut req, _| {
//!     req.headers.set("Authorization", "Bearer token");
//!     Some(req)
//! });
//! client.add_exception_filter(|failure, _, _| {
//!     (failure.status() == Some(404)).then(|| Reply::Json(json!(null)))
//! });
//!
//! let item = client.post("items", Some(&json!({"value": 100})), Options::new()).await?;
//! # let _ = item;
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Failure, TransportError};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Options, Reply, RequestKind};
