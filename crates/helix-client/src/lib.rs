//! Twitch Helix client library.
//!
//! Provides the shared request/response pipeline (query encoding, header
//! injection, JSON bodies, uniform error mapping), auth header strategies,
//! and typed Helix endpoint groups built on top of them.

pub mod auth;
pub mod client;
pub mod helix;

pub use client::CallContext;
pub use helix::{ClientOptions, HelixClient, RequestOptions};

/// Message used when Helix answers with an error but no message.
pub const UNKNOWN_MESSAGE: &str = "<unknown>";

/// Error reported by Helix for a non-2xx response.
///
/// Formats as `[<status>] <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{status}] {message}")]
pub struct ApiError {
    message: String,
    status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            UNKNOWN_MESSAGE.to_owned()
        } else {
            message
        };
        Self { message, status }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}

/// Unified error type for the helix-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TwitchError {
    /// The API error carried by this error, if Helix answered with one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_formats_as_unknown() {
        let err = ApiError::new("", 400);
        assert_eq!(err.to_string(), "[400] <unknown>");
        assert_eq!(err.message(), UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let err = ApiError::new("test", 400);
        assert_eq!(err.to_string(), "[400] test");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_api_variant_displays_transparently() {
        let err = TwitchError::from(ApiError::new("Missing scope", 401));
        assert_eq!(err.to_string(), "[401] Missing scope");
        assert_eq!(err.api_error().map(ApiError::status), Some(401));
        assert!(TwitchError::Timeout.api_error().is_none());
    }
}
