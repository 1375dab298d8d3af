//! Shared HTTP plumbing used by every Helix call.
//!
//! [`HttpClient::request`] turns a [`RequestConfig`] into a [`Request`].
//! Executing it yields a [`Response`] envelope, which is decoded exactly once
//! with [`Response::with_body`] or [`Response::without_body`].

mod context;
mod query;
mod request;
mod response;

use std::time::Duration;

pub use context::CallContext;
pub use query::Query;
pub use request::{Request, RequestConfig};
pub use response::{ErrorBody, Response};

/// Client-level options for [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Bounds a whole call, header factory and network combined.
    /// `None` disables the client-level timeout.
    pub request_timeout: Option<Duration>,

    /// Pre-built transport, e.g. with tuned pooling or a proxy.
    /// Defaults to `reqwest::Client::new()`.
    pub http: Option<reqwest::Client>,
}

/// Wrapper around a shared `reqwest::Client`.
///
/// Immutable after construction; clone it freely across tasks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl HttpClient {
    pub fn new(options: Options) -> Self {
        Self {
            http: options.http.unwrap_or_default(),
            request_timeout: options.request_timeout,
        }
    }

    /// Start a request. Nothing is sent until [`Request::execute`].
    pub fn request<'a>(&'a self, config: RequestConfig<'a>) -> Request<'a> {
        Request::new(self, config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
