//! Twitch Helix REST API client.
//!
//! Every endpoint takes a [`CallContext`] and a request struct embedding
//! [`RequestOptions`], and is a thin composition over the shared pipeline:
//! build query, attach headers, send, decode JSON or map the error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::TwitchError;
use crate::auth::AccessTokenLoader;
use crate::client::{self, CallContext, HttpClient, Query};

mod ads;
mod analytics;
mod channel_points;
mod channels;
mod chat;
pub mod models;
mod request;
mod streams;
mod subscriptions;
#[cfg(test)]
mod test_support;
mod users;

pub use ads::StartCommercialRequest;
pub use analytics::{GetExtensionAnalyticsRequest, GetGameAnalyticsRequest};
pub use channel_points::{
    CreateCustomRewardRequest, DeleteCustomRewardRequest, GetCustomRewardsRequest,
    UpdateCustomRewardRequest,
};
pub use channels::{
    GetChannelEditorsRequest, GetChannelInformationRequest, ModifyChannelInformationRequest,
};
pub use chat::{
    GetChannelChatBadgesRequest, GetChannelEmotesRequest, GetChatSettingsRequest,
    GetEmoteSetsRequest, GetGlobalChatBadgesRequest, GetGlobalEmotesRequest,
    GetUserChatColorsRequest, SendChatAnnouncementRequest, UpdateChatSettingsRequest,
    UpdateUserChatColorRequest, format_chat_emote_template,
};
pub use streams::GetStreamsRequest;
pub use subscriptions::CheckUserSubscriptionRequest;
pub use users::{
    BlockUserRequest, GetUserActiveExtensionsRequest, GetUserBlocksRequest,
    GetUserExtensionsRequest, GetUserFollowsRequest, GetUsersRequest, UnblockUserRequest,
    UpdateUserExtensionsRequest, UpdateUserRequest,
};

pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Options accepted by [`HelixClient::new`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Third-party client ID from dev.twitch.tv. Bearer tokens must have been
    /// issued for this client ID.
    pub client_id: String,

    /// Client-level bound on every call. `None` means no client timeout;
    /// individual calls can still be bounded through their [`CallContext`].
    pub request_timeout: Option<Duration>,

    /// Pre-built transport for pooling, proxy or TLS tuning.
    pub http_client: Option<reqwest::Client>,

    /// Fallback token source for requests that carry no token, e.g. an app
    /// access token loader.
    pub access_token_loader: Option<Arc<dyn AccessTokenLoader>>,

    /// Helix root, defaults to [`HELIX_BASE`].
    pub base_url: Option<String>,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("client_id", &self.client_id)
            .field("request_timeout", &self.request_timeout)
            .field("http_client", &self.http_client.is_some())
            .field("access_token_loader", &self.access_token_loader.is_some())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientOptions {
    /// Read options from the environment.
    ///
    /// - `TWITCH_CLIENT_ID`
    /// - `TWITCH_REQUEST_TIMEOUT_SECS` (ignored unless a whole number)
    /// - `TWITCH_HELIX_BASE_URL` (ignored when empty)
    pub fn from_env() -> Self {
        let mut options = Self {
            client_id: std::env::var("TWITCH_CLIENT_ID").unwrap_or_default(),
            ..Self::default()
        };

        if let Ok(v) = std::env::var("TWITCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = v.trim().parse::<u64>() {
                options.request_timeout = Some(Duration::from_secs(secs));
            }
        }
        if let Ok(v) = std::env::var("TWITCH_HELIX_BASE_URL") {
            if !v.is_empty() {
                options.base_url = Some(v);
            }
        }

        options
    }

    pub fn with_access_token_loader(mut self, loader: impl AccessTokenLoader + 'static) -> Self {
        self.access_token_loader = Some(Arc::new(loader));
        self
    }
}

/// Options common to every Helix request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// OAuth bearer token for this request. When `None` or empty, the
    /// client's access token loader is consulted instead.
    pub token: Option<String>,
}

impl RequestOptions {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

/// Typed Helix client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HelixClient {
    http: HttpClient,
    client_id: String,
    access_token_loader: Option<Arc<dyn AccessTokenLoader>>,
    base_url: String,
}

impl fmt::Debug for HelixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelixClient")
            .field("client_id", &self.client_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HelixClient {
    pub fn new(options: ClientOptions) -> Result<Self, TwitchError> {
        let base_url = options.base_url.as_deref().unwrap_or(HELIX_BASE);
        Url::parse(base_url)?;

        Ok(Self {
            http: HttpClient::new(client::Options {
                request_timeout: options.request_timeout,
                http: options.http_client,
            }),
            client_id: options.client_id,
            access_token_loader: options.access_token_loader,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token_loader_fn;

    #[test]
    fn test_defaults_to_public_helix_root() {
        let client = HelixClient::new(ClientOptions::default()).unwrap();
        assert_eq!(client.base_url(), HELIX_BASE);
    }

    #[test]
    fn test_trailing_slash_is_trimmed_from_base_url() {
        let client = HelixClient::new(ClientOptions {
            base_url: Some("http://localhost:8080/helix/".into()),
            ..ClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/helix");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HelixClient::new(ClientOptions {
            base_url: Some("not a url".into()),
            ..ClientOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, TwitchError::UrlParse(_)));
    }

    #[test]
    fn test_debug_output_hides_loader() {
        let options = ClientOptions {
            client_id: "abc".into(),
            ..ClientOptions::default()
        }
        .with_access_token_loader(token_loader_fn(|_| async { Ok("secret".to_owned()) }));

        let debug = format!("{options:?}");
        assert!(debug.contains("access_token_loader: true"));
        assert!(!debug.contains("secret"));
    }
}
