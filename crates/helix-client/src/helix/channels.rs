use serde::Serialize;

use super::models::{Channel, ChannelEditor, HelixResponse};
use super::*;

const CHANNELS_PATH: &str = "/channels";
const CHANNEL_EDITORS_PATH: &str = "/channels/editors";

#[derive(Debug, Clone, Default)]
pub struct GetChannelInformationRequest {
    pub options: RequestOptions,

    /// Broadcasters to look up, at most 100.
    pub broadcaster_ids: Vec<String>,
}

/// Channel update. Only fields that are `Some` are changed.
#[derive(Debug, Clone, Default)]
pub struct ModifyChannelInformationRequest {
    pub options: RequestOptions,

    pub broadcaster_id: String,

    /// Game being played. `"0"` or `""` unsets the game.
    pub game_id: Option<String>,

    /// ISO 639-1 code or `other`.
    pub broadcaster_language: Option<String>,

    /// Stream title; must not be empty.
    pub title: Option<String>,

    /// Stream delay in seconds. Partners only.
    pub delay: Option<u32>,
}

#[derive(Serialize)]
struct ModifyChannelInformationBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    game_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    broadcaster_language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct GetChannelEditorsRequest {
    pub options: RequestOptions,

    pub broadcaster_id: String,
}

impl HelixClient {
    /// <https://dev.twitch.tv/docs/api/reference#get-channel-information>
    pub async fn get_channel_information(
        &self,
        ctx: &CallContext,
        req: &GetChannelInformationRequest,
    ) -> Result<HelixResponse<Channel>, TwitchError> {
        let mut query = Query::new();
        query.extend("broadcaster_id", req.broadcaster_ids.iter().map(String::as_str));

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHANNELS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// Update a channel's game, language, title or delay.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#modify-channel-information>
    pub async fn modify_channel_information(
        &self,
        ctx: &CallContext,
        req: &ModifyChannelInformationRequest,
    ) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query.set("broadcaster_id", &req.broadcaster_id);

        let headers = self.headers(&req.options);
        self.request(Method::PATCH, CHANNELS_PATH, query, &headers)
            .body_json(&ModifyChannelInformationBody {
                game_id: req.game_id.as_deref(),
                broadcaster_language: req.broadcaster_language.as_deref(),
                title: req.title.as_deref(),
                delay: req.delay,
            })
            .execute(ctx)
            .await
            .without_body()
            .await
    }

    /// Users with editor permissions on a channel.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#get-channel-editors>
    pub async fn get_channel_editors(
        &self,
        ctx: &CallContext,
        req: &GetChannelEditorsRequest,
    ) -> Result<HelixResponse<ChannelEditor>, TwitchError> {
        let mut query = Query::new();
        query.set("broadcaster_id", &req.broadcaster_id);

        let headers = self.headers(&req.options);
        self.request(Method::GET, CHANNEL_EDITORS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}
