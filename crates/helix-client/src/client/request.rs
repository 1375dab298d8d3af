use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;

use super::{CallContext, HttpClient, Query, Response};
use crate::TwitchError;
use crate::auth::HeaderFactory;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Description of one outbound call.
pub struct RequestConfig<'a> {
    pub method: Method,

    /// Base URL. It must not carry a query string; put parameters in
    /// [`RequestConfig::query`] instead. A URL with one fails the request
    /// at [`Request::execute`] without sending it.
    pub url: String,

    pub query: Query,

    /// Invoked once, at execution time, to produce auth and metadata headers.
    pub headers: &'a dyn HeaderFactory,
}

/// Headers and body accumulated before the first builder error.
#[derive(Default)]
struct Prepared {
    headers: HeaderMap,
    body: Vec<u8>,
}

/// A single call being assembled.
///
/// The first builder error is kept and returned by [`Request::execute`];
/// builder calls after it do nothing.
pub struct Request<'a> {
    client: &'a HttpClient,
    config: RequestConfig<'a>,
    state: Result<Prepared, TwitchError>,
}

impl<'a> Request<'a> {
    pub(super) fn new(client: &'a HttpClient, config: RequestConfig<'a>) -> Self {
        let state = if config.url.contains('?') {
            Err(TwitchError::InvalidUrl(format!(
                "{} already has a query string",
                config.url
            )))
        } else {
            Ok(Prepared::default())
        };
        Self {
            client,
            config,
            state,
        }
    }

    /// Serialize `body` as the JSON request body.
    pub fn body_json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.state = self.state.and_then(|mut prepared| {
            prepared.body = serde_json::to_vec(body).map_err(TwitchError::Encode)?;
            prepared
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            Ok(prepared)
        });
        self
    }

    /// Send the request and wrap the outcome for decoding.
    ///
    /// The header factory and the network round trip both run under `ctx`
    /// and the client's request timeout.
    pub async fn execute(self, ctx: &CallContext) -> Response {
        let Request {
            client,
            config,
            state,
        } = self;

        let prepared = match state {
            Ok(prepared) => prepared,
            Err(err) => return Response::new(Err(err)),
        };

        let url = if config.query.is_empty() {
            config.url
        } else {
            format!("{}?{}", config.url, config.query.encode())
        };
        let method = config.method;
        let factory = config.headers;

        let send = async {
            let extra = factory.headers(ctx).await?;
            let mut headers = prepared.headers;
            merge_headers(&mut headers, &extra);

            tracing::debug!(%method, %url, "Sending Helix request");
            let mut builder = client.http.request(method, url.as_str()).headers(headers);
            if !prepared.body.is_empty() {
                builder = builder.body(prepared.body);
            }
            let response = builder.send().await?;
            tracing::debug!(
                status = response.status().as_u16(),
                %url,
                "Received Helix response"
            );
            Ok::<_, TwitchError>(response)
        };

        Response::new(ctx.run(client.request_timeout, send).await)
    }
}

/// Append every value of `extra`, keeping values already present.
fn merge_headers(headers: &mut HeaderMap, extra: &HeaderMap) {
    for (name, value) in extra {
        headers.append(name.clone(), value.clone());
    }
}
