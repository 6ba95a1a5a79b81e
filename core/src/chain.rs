//! Filter chains.
//!
//! # Design
//! Each chain is an ordered list of boxed closures folded at call time.
//! Request and response chains are pipelines: filters run in registration
//! order and each one receives the previous filter's output. The exception
//! chain is a handler stack: the most recently registered filter gets the
//! first chance to recover a failure and an empty chain never recovers.

use std::fmt;

use crate::error::{ClientError, Failure};
use crate::http::HttpRequest;
use crate::types::{Options, Reply};

/// Rewrites an outgoing request. `None` means the filter malfunctioned.
pub type RequestFilter = Box<dyn Fn(HttpRequest, &Options) -> Option<HttpRequest> + Send + Sync>;

/// Transforms a successful reply. `Ok(None)` means the filter malfunctioned;
/// `Err` rejects the call with that error.
pub type ResponseFilter =
    Box<dyn Fn(Reply, &HttpRequest, &Options) -> Result<Option<Reply>, ClientError> + Send + Sync>;

/// Tries to recover a failure. `None` declines and passes it on.
pub type ExceptionFilter = Box<dyn Fn(&Failure, &HttpRequest, &Options) -> Option<Reply> + Send + Sync>;

#[derive(Default)]
pub struct RequestChain {
    filters: Vec<RequestFilter>,
}

impl RequestChain {
    pub fn push<F>(&mut self, filter: F)
    where
        F: Fn(HttpRequest, &Options) -> Option<HttpRequest> + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub(crate) fn len(&self) -> usize {
        self.filters.len()
    }

    /// Run every filter in registration order, stopping at the first `None`.
    pub fn apply(&self, request: HttpRequest, options: &Options) -> Option<HttpRequest> {
        self.filters
            .iter()
            .try_fold(request, |request, filter| filter(request, options))
    }
}

#[derive(Default)]
pub struct ResponseChain {
    filters: Vec<ResponseFilter>,
}

impl ResponseChain {
    pub fn push<F>(&mut self, filter: F)
    where
        F: Fn(Reply, &HttpRequest, &Options) -> Result<Option<Reply>, ClientError> + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub(crate) fn len(&self) -> usize {
        self.filters.len()
    }

    /// Run every filter in registration order. Short-circuits on `Ok(None)`
    /// and on the first error.
    pub fn apply(
        &self,
        reply: Reply,
        request: &HttpRequest,
        options: &Options,
    ) -> Result<Option<Reply>, ClientError> {
        let mut current = reply;
        for filter in &self.filters {
            match filter(current, request, options)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

#[derive(Default)]
pub struct ExceptionChain {
    filters: Vec<ExceptionFilter>,
}

impl ExceptionChain {
    pub fn push<F>(&mut self, filter: F)
    where
        F: Fn(&Failure, &HttpRequest, &Options) -> Option<Reply> + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub(crate) fn len(&self) -> usize {
        self.filters.len()
    }

    /// Newest filter first; the first `Some` wins.
    pub fn apply(&self, failure: &Failure, request: &HttpRequest, options: &Options) -> Option<Reply> {
        self.filters
            .iter()
            .rev()
            .find_map(|filter| filter(failure, request, options))
    }
}

impl fmt::Debug for RequestChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestChain").field("filters", &self.len()).finish()
    }
}

impl fmt::Debug for ResponseChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseChain").field("filters", &self.len()).finish()
    }
}

impl fmt::Debug for ExceptionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionChain").field("filters", &self.len()).finish()
    }
}
