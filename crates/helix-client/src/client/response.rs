use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ApiError, TwitchError};

/// Error payload Helix sends with non-2xx responses. A missing or `null`
/// message is reported as `<unknown>`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of one executed request: the HTTP response or the error that
/// prevented one. Consumed exactly once by a decode method.
#[derive(Debug)]
pub struct Response {
    inner: Result<reqwest::Response, TwitchError>,
}

impl Response {
    pub(super) fn new(inner: Result<reqwest::Response, TwitchError>) -> Self {
        Self { inner }
    }

    /// Decode a 2xx body as JSON into `T`.
    ///
    /// Transport and builder errors are returned untouched. Non-2xx statuses
    /// become [`TwitchError::Api`], or [`TwitchError::Decode`] when the error
    /// body is not `{"message": ...}`.
    pub async fn with_body<T: DeserializeOwned>(self) -> Result<T, TwitchError> {
        let response = self.check().await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(TwitchError::Decode)
    }

    /// Classify the status only; a 2xx body is dropped unread.
    pub async fn without_body(self) -> Result<(), TwitchError> {
        self.check().await.map(drop)
    }

    async fn check(self) -> Result<reqwest::Response, TwitchError> {
        let response = self.inner?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        let error: ErrorBody = serde_json::from_slice(&body).map_err(TwitchError::Decode)?;
        Err(ApiError::new(error.message.unwrap_or_default(), status.as_u16()).into())
    }
}
