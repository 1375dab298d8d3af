use serde::Serialize;

use super::models::{
    ChannelEmote, ChatBadge, ChatSettings, EmoteResponse, GlobalEmote, HelixResponse, SetEmote,
    UserChatColor,
};
use super::*;

const CHAT_EMOTES_PATH: &str = "/chat/emotes";
const CHAT_GLOBAL_EMOTES_PATH: &str = "/chat/emotes/global";
const CHAT_EMOTE_SETS_PATH: &str = "/chat/emotes/set";
const CHAT_BADGES_PATH: &str = "/chat/badges";
const CHAT_GLOBAL_BADGES_PATH: &str = "/chat/badges/global";
const CHAT_SETTINGS_PATH: &str = "/chat/settings";
const CHAT_ANNOUNCEMENTS_PATH: &str = "/chat/announcements";
const CHAT_COLOR_PATH: &str = "/chat/color";

/// Fill an emote CDN template such as
/// `https://static-cdn.jtvnw.net/emoticons/v2/{{id}}/{{format}}/{{theme_mode}}/{{scale}}`.
pub fn format_chat_emote_template(
    template: &str,
    id: &str,
    format: &str,
    theme_mode: &str,
    scale: &str,
) -> String {
    template
        .replace("{{id}}", id)
        .replace("{{format}}", format)
        .replace("{{theme_mode}}", theme_mode)
        .replace("{{scale}}", scale)
}

impl<T> EmoteResponse<T> {
    /// CDN URL for one emote, built from this response's template.
    pub fn emote_url(&self, id: &str, format: &str, theme_mode: &str, scale: &str) -> String {
        format_chat_emote_template(&self.template, id, format, theme_mode, scale)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetChannelEmotesRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetGlobalEmotesRequest {
    pub options: RequestOptions,
}

#[derive(Debug, Clone, Default)]
pub struct GetEmoteSetsRequest {
    pub options: RequestOptions,

    /// Emote sets to fetch, at most 25.
    pub emote_set_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetChannelChatBadgesRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetGlobalChatBadgesRequest {
    pub options: RequestOptions,
}

#[derive(Debug, Clone, Default)]
pub struct GetChatSettingsRequest {
    pub options: RequestOptions,

    pub broadcaster_id: String,

    /// Required to see `non_moderator_chat_delay` settings.
    pub moderator_id: Option<String>,
}

/// Chat settings update. Only fields that are `Some` are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateChatSettingsRequest {
    pub options: RequestOptions,

    pub broadcaster_id: String,

    /// Broadcaster or one of their moderators; must match the token's user.
    pub moderator_id: String,

    pub emote_mode: Option<bool>,
    pub follower_mode: Option<bool>,
    pub non_moderator_chat_delay: Option<bool>,
    pub slow_mode: Option<bool>,
    pub subscriber_mode: Option<bool>,
    pub unique_chat_mode: Option<bool>,

    /// Minutes, 0 to 129600.
    pub follower_mode_duration: Option<u32>,

    /// Seconds: 2, 4 or 6.
    pub non_moderator_chat_delay_duration: Option<u32>,

    /// Seconds, 3 to 120.
    pub slow_mode_wait_time: Option<u32>,
}

#[derive(Serialize)]
struct UpdateChatSettingsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    emote_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    follower_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    non_moderator_chat_delay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slow_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscriber_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique_chat_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    follower_mode_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    non_moderator_chat_delay_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slow_mode_wait_time: Option<u32>,
}

impl From<&UpdateChatSettingsRequest> for UpdateChatSettingsBody {
    fn from(req: &UpdateChatSettingsRequest) -> Self {
        Self {
            emote_mode: req.emote_mode,
            follower_mode: req.follower_mode,
            non_moderator_chat_delay: req.non_moderator_chat_delay,
            slow_mode: req.slow_mode,
            subscriber_mode: req.subscriber_mode,
            unique_chat_mode: req.unique_chat_mode,
            follower_mode_duration: req.follower_mode_duration,
            non_moderator_chat_delay_duration: req.non_moderator_chat_delay_duration,
            slow_mode_wait_time: req.slow_mode_wait_time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendChatAnnouncementRequest {
    pub options: RequestOptions,

    pub broadcaster_id: String,

    /// Broadcaster or one of their moderators; must match the token's user.
    pub moderator_id: String,

    /// `blue`, `green`, `orange`, `purple` or `primary` (the default).
    pub color: Option<String>,

    /// Up to 500 characters.
    pub message: String,
}

#[derive(Serialize)]
struct SendChatAnnouncementBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    message: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct GetUserChatColorsRequest {
    pub options: RequestOptions,

    /// Users to look up, at most 100.
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserChatColorRequest {
    pub options: RequestOptions,

    /// Must match the token's user.
    pub user_id: String,

    /// Named color such as `blue_violet`, or a hex code like `#9146FF`
    /// for Turbo and Prime users.
    pub color: String,
}

impl HelixClient {
    /// <https://dev.twitch.tv/docs/api/reference#get-channel-emotes>
    pub async fn get_channel_emotes(
        &self,
        ctx: &CallContext,
        req: &GetChannelEmotesRequest,
    ) -> Result<EmoteResponse<ChannelEmote>, TwitchError> {
        let mut query = Query::new();
        query.set("broadcaster_id", &req.broadcaster_id);

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_EMOTES_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-global-emotes>
    pub async fn get_global_emotes(
        &self,
        ctx: &CallContext,
        req: &GetGlobalEmotesRequest,
    ) -> Result<EmoteResponse<GlobalEmote>, TwitchError> {
        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_GLOBAL_EMOTES_PATH, Query::new(), &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-emote-sets>
    pub async fn get_emote_sets(
        &self,
        ctx: &CallContext,
        req: &GetEmoteSetsRequest,
    ) -> Result<EmoteResponse<SetEmote>, TwitchError> {
        let mut query = Query::new();
        query.extend("emote_set_id", req.emote_set_ids.iter().map(String::as_str));

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_EMOTE_SETS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-channel-chat-badges>
    pub async fn get_channel_chat_badges(
        &self,
        ctx: &CallContext,
        req: &GetChannelChatBadgesRequest,
    ) -> Result<HelixResponse<ChatBadge>, TwitchError> {
        let mut query = Query::new();
        query.set("broadcaster_id", &req.broadcaster_id);

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_BADGES_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-global-chat-badges>
    pub async fn get_global_chat_badges(
        &self,
        ctx: &CallContext,
        req: &GetGlobalChatBadgesRequest,
    ) -> Result<HelixResponse<ChatBadge>, TwitchError> {
        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_GLOBAL_BADGES_PATH, Query::new(), &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-chat-settings>
    pub async fn get_chat_settings(
        &self,
        ctx: &CallContext,
        req: &GetChatSettingsRequest,
    ) -> Result<HelixResponse<ChatSettings>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set_opt("moderator_id", req.moderator_id.as_deref().filter(|id| !id.is_empty()));

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_SETTINGS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// Returns the settings as they are after the update.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#update-chat-settings>
    pub async fn update_chat_settings(
        &self,
        ctx: &CallContext,
        req: &UpdateChatSettingsRequest,
    ) -> Result<HelixResponse<ChatSettings>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set("moderator_id", &req.moderator_id);

        let headers = self.headers(&req.options);
        self.request(Method::PATCH, CHAT_SETTINGS_PATH, query, &headers)
            .body_json(&UpdateChatSettingsBody::from(req))
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#send-chat-announcement>
    pub async fn send_chat_announcement(
        &self,
        ctx: &CallContext,
        req: &SendChatAnnouncementRequest,
    ) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set("moderator_id", &req.moderator_id);

        let headers = self.headers(&req.options);
        self.request(Method::POST, CHAT_ANNOUNCEMENTS_PATH, query, &headers)
            .body_json(&SendChatAnnouncementBody {
                color: req.color.as_deref().filter(|color| !color.is_empty()),
                message: &req.message,
            })
            .execute(ctx)
            .await
            .without_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-user-chat-color>
    pub async fn get_user_chat_colors(
        &self,
        ctx: &CallContext,
        req: &GetUserChatColorsRequest,
    ) -> Result<HelixResponse<UserChatColor>, TwitchError> {
        let mut query = Query::new();
        query.extend("user_id", req.user_ids.iter().map(String::as_str));

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHAT_COLOR_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#update-user-chat-color>
    pub async fn update_user_chat_color(
        &self,
        ctx: &CallContext,
        req: &UpdateUserChatColorRequest,
    ) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query
            .set("user_id", &req.user_id)
            .set("color", &req.color);

        let headers = self.headers(&req.options);
        self.request(Method::PUT, CHAT_COLOR_PATH, query, &headers)
            .execute(ctx)
            .await
            .without_body()
            .await
    }
}
