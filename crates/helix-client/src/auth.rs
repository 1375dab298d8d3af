//! Header strategies and access-token loaders.
//!
//! [`HelixHeaders`] injects `Client-Id` and a bearer token taken from the
//! request or, when the request has none, from an [`AccessTokenLoader`].
//! [`ClientCredentials`] is a loader that obtains app access tokens through
//! the OAuth client-credentials grant.

use std::future::Future;

use chrono::Utc;
use futures_util::future::BoxFuture;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{CallContext, TwitchError};

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const CLIENT_ID: HeaderName = HeaderName::from_static("client-id");
/// Refetch app tokens this many seconds before they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Produces the headers for one call. Invoked once per request, at
/// execution time, and may do async work such as loading a token.
pub trait HeaderFactory: Send + Sync {
    fn headers<'a>(&'a self, ctx: &'a CallContext)
    -> BoxFuture<'a, Result<HeaderMap, TwitchError>>;
}

/// Fixed headers.
impl HeaderFactory for HeaderMap {
    fn headers<'a>(
        &'a self,
        _ctx: &'a CallContext,
    ) -> BoxFuture<'a, Result<HeaderMap, TwitchError>> {
        Box::pin(async move { Ok(self.clone()) })
    }
}

/// Fallback source of bearer tokens for requests that carry none.
pub trait AccessTokenLoader: Send + Sync {
    fn load<'a>(&'a self, ctx: &'a CallContext) -> BoxFuture<'a, Result<String, TwitchError>>;
}

/// [`AccessTokenLoader`] backed by an async closure. See [`token_loader_fn`].
pub struct TokenLoaderFn<F>(F);

/// Wrap an async closure as an [`AccessTokenLoader`].
///
/// The closure gets the call's context; clone it into the returned future
/// to observe cancellation or the deadline.
///
/// ```ignore
/// let loader = token_loader_fn(|_ctx| async { Ok("app-token".to_owned()) });
/// ```
pub fn token_loader_fn<F, Fut>(f: F) -> TokenLoaderFn<F>
where
    F: Fn(&CallContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, TwitchError>> + Send + 'static,
{
    TokenLoaderFn(f)
}

impl<F, Fut> AccessTokenLoader for TokenLoaderFn<F>
where
    F: Fn(&CallContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, TwitchError>> + Send + 'static,
{
    fn load<'a>(&'a self, ctx: &'a CallContext) -> BoxFuture<'a, Result<String, TwitchError>> {
        Box::pin((self.0)(ctx))
    }
}

/// Header strategy for Helix calls.
///
/// Sends `Accept: application/json` and `Client-Id`. The bearer token is
/// the per-request `token` when set, otherwise whatever `loader` returns.
/// With neither, no `Authorization` header is sent.
#[derive(Clone, Copy)]
pub struct HelixHeaders<'a> {
    pub client_id: &'a str,
    pub token: Option<&'a str>,
    pub loader: Option<&'a dyn AccessTokenLoader>,
}

impl HelixHeaders<'_> {
    async fn resolve_token(&self, ctx: &CallContext) -> Result<Option<String>, TwitchError> {
        if let Some(token) = self.token.filter(|token| !token.is_empty()) {
            return Ok(Some(token.to_owned()));
        }

        match self.loader {
            Some(loader) => {
                let token = loader.load(ctx).await?;
                Ok(Some(token).filter(|token| !token.is_empty()))
            }
            None => Ok(None),
        }
    }
}

impl HeaderFactory for HelixHeaders<'_> {
    fn headers<'a>(
        &'a self,
        ctx: &'a CallContext,
    ) -> BoxFuture<'a, Result<HeaderMap, TwitchError>> {
        Box::pin(async move {
            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            headers.insert(CLIENT_ID, header_value(self.client_id)?);

            if let Some(token) = self.resolve_token(ctx).await? {
                let mut bearer = header_value(&format!("Bearer {token}"))?;
                bearer.set_sensitive(true);
                headers.insert(AUTHORIZATION, bearer);
            }

            Ok(headers)
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TwitchError> {
    HeaderValue::from_str(value).map_err(|e| TwitchError::InvalidHeader(e.to_string()))
}

/// Twitch OAuth token response for the client-credentials grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Twitch OAuth error response.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

struct AppToken {
    access_token: String,
    expires_at: i64,
}

/// Loads app access tokens via the OAuth client-credentials grant.
///
/// A fetched token is reused until shortly before it expires. Concurrent
/// callers share one in-flight refresh.
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: reqwest::Client,
    current: Mutex<Option<AppToken>>,
}

impl ClientCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            token_url: TOKEN_URL.to_owned(),
            http: reqwest::Client::new(),
            current: Mutex::new(None),
        }
    }

    /// Use another token endpoint, e.g. a local mock server.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Return the cached app token, fetching a new one when it is missing
    /// or about to expire.
    pub async fn access_token(&self) -> Result<String, TwitchError> {
        let mut current = self.current.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = current
            .as_ref()
            .filter(|token| now < token.expires_at - EXPIRY_MARGIN_SECS)
        {
            return Ok(token.access_token.clone());
        }

        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *current = Some(token);
        Ok(access_token)
    }

    async fn request_token(&self) -> Result<AppToken, TwitchError> {
        tracing::info!("Requesting Twitch app access token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|err| err.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), "App access token request failed");
            return Err(TwitchError::TokenRequestFailed(format!(
                "{}: {message}",
                status.as_u16()
            )));
        }

        let token_resp: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            TwitchError::TokenRequestFailed(format!("failed to parse response: {e}"))
        })?;

        Ok(AppToken {
            access_token: token_resp.access_token,
            expires_at: Utc::now().timestamp() + token_resp.expires_in,
        })
    }
}

impl AccessTokenLoader for ClientCredentials {
    fn load<'a>(&'a self, _ctx: &'a CallContext) -> BoxFuture<'a, Result<String, TwitchError>> {
        Box::pin(self.access_token())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn counting_loader(
        calls: Arc<AtomicUsize>,
        token: &'static str,
    ) -> impl AccessTokenLoader + 'static {
        token_loader_fn(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(token.to_owned()) }
        })
    }

    #[tokio::test]
    async fn test_explicit_token_is_sent_as_bearer() {
        let headers = HelixHeaders {
            client_id: "client",
            token: Some("abc123"),
            loader: None,
        };
        let map = headers.headers(&CallContext::background()).await.unwrap();

        assert_eq!(map[AUTHORIZATION], "Bearer abc123");
        assert_eq!(map["client-id"], "client");
        assert_eq!(map[ACCEPT], "application/json");
    }

    #[tokio::test]
    async fn test_no_token_and_no_loader_sends_no_authorization() {
        let headers = HelixHeaders {
            client_id: "client",
            token: None,
            loader: None,
        };
        let map = headers.headers(&CallContext::background()).await.unwrap();
        assert!(!map.contains_key(AUTHORIZATION));

        let empty = HelixHeaders {
            token: Some(""),
            ..headers
        };
        let map = empty.headers(&CallContext::background()).await.unwrap();
        assert!(!map.contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_loader_is_used_only_without_explicit_token() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), "app-token");

        let with_token = HelixHeaders {
            client_id: "client",
            token: Some("user-token"),
            loader: Some(&loader),
        };
        let map = with_token.headers(&CallContext::background()).await.unwrap();
        assert_eq!(map[AUTHORIZATION], "Bearer user-token");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let fallback = HelixHeaders {
            token: None,
            ..with_token
        };
        let map = fallback.headers(&CallContext::background()).await.unwrap();
        assert_eq!(map[AUTHORIZATION], "Bearer app-token");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_loader_token_sends_no_authorization() {
        let loader = token_loader_fn(|_| async { Ok(String::new()) });
        let headers = HelixHeaders {
            client_id: "client",
            token: None,
            loader: Some(&loader),
        };
        let map = headers.headers(&CallContext::background()).await.unwrap();
        assert!(!map.contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_loader_failure_is_surfaced() {
        let loader = token_loader_fn(|_| async {
            Err(TwitchError::TokenRequestFailed("offline".into()))
        });
        let headers = HelixHeaders {
            client_id: "client",
            token: None,
            loader: Some(&loader),
        };
        let err = headers
            .headers(&CallContext::background())
            .await
            .unwrap_err();
        assert!(matches!(err, TwitchError::TokenRequestFailed(msg) if msg == "offline"));
    }

    #[tokio::test]
    async fn test_closure_loader_receives_call_context() {
        let loader = token_loader_fn(|ctx: &CallContext| {
            let ctx = ctx.clone();
            async move {
                if ctx.is_cancelled() {
                    return Err(TwitchError::Cancelled);
                }
                Ok(if ctx.deadline().is_some() {
                    "bounded".to_owned()
                } else {
                    "unbounded".to_owned()
                })
            }
        });
        let headers = HelixHeaders {
            client_id: "client",
            token: None,
            loader: Some(&loader),
        };

        let ctx = CallContext::background();
        let map = headers.headers(&ctx).await.unwrap();
        assert_eq!(map[AUTHORIZATION], "Bearer unbounded");

        let bounded = ctx.with_timeout(std::time::Duration::from_secs(30));
        let map = headers.headers(&bounded).await.unwrap();
        assert_eq!(map[AUTHORIZATION], "Bearer bounded");

        bounded.cancel();
        let err = headers.headers(&bounded).await.unwrap_err();
        assert!(matches!(err, TwitchError::Cancelled));
    }

    #[tokio::test]
    async fn test_invalid_token_characters_are_rejected() {
        let headers = HelixHeaders {
            client_id: "client",
            token: Some("bad\ntoken"),
            loader: None,
        };
        let err = headers
            .headers(&CallContext::background())
            .await
            .unwrap_err();
        assert!(matches!(err, TwitchError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn test_client_credentials_caches_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "app-token",
                "expires_in": 3600,
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let loader = ClientCredentials::new("id".into(), "secret".into())
            .with_token_url(format!("{}/oauth2/token", server.uri()));
        let ctx = CallContext::background();

        assert_eq!(loader.load(&ctx).await.unwrap(), "app-token");
        assert_eq!(loader.load(&ctx).await.unwrap(), "app-token");
    }

    #[tokio::test]
    async fn test_client_credentials_refetches_expiring_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "short-lived",
                "expires_in": 30
            })))
            .expect(2)
            .mount(&server)
            .await;

        let loader = ClientCredentials::new("id".into(), "secret".into())
            .with_token_url(format!("{}/oauth2/token", server.uri()));

        loader.access_token().await.unwrap();
        loader.access_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_credentials_reports_endpoint_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": 400,
                "message": "invalid client secret"
            })))
            .mount(&server)
            .await;

        let loader = ClientCredentials::new("id".into(), "wrong".into())
            .with_token_url(format!("{}/oauth2/token", server.uri()));

        let err = loader.access_token().await.unwrap_err();
        assert!(
            matches!(&err, TwitchError::TokenRequestFailed(msg) if msg == "400: invalid client secret"),
            "unexpected error: {err}"
        );
    }
}
