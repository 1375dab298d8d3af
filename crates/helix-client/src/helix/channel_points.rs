use serde::Serialize;

use super::models::{CustomReward, HelixResponse};
use super::*;

const CUSTOM_REWARDS_PATH: &str = "/channel_points/custom_rewards";

#[derive(Debug, Clone, Default)]
pub struct GetCustomRewardsRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
    /// Rewards to fetch, at most 50. Empty returns every reward.
    pub ids: Vec<String>,
    /// Only rewards created by this app's client ID.
    pub only_manageable_rewards: Option<bool>,
}

/// New reward. Everything except `title` and `cost` falls back to Twitch's
/// defaults when `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCustomRewardRequest {
    #[serde(skip)]
    pub options: RequestOptions,
    #[serde(skip)]
    pub broadcaster_id: String,

    pub title: String,
    pub cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Hex color such as `#9147FF`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user_input_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_max_per_stream_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_stream: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_max_per_user_per_stream_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_user_per_stream: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_global_cooldown_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_cooldown_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_redemptions_skip_request_queue: Option<bool>,
}

/// Reward update. Only fields that are `Some` are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCustomRewardRequest {
    #[serde(skip)]
    pub options: RequestOptions,
    #[serde(skip)]
    pub broadcaster_id: String,
    #[serde(skip)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user_input_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_redemptions_skip_request_queue: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteCustomRewardRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
    pub id: String,
}

impl HelixClient {
    /// <https://dev.twitch.tv/docs/api/reference#get-custom-reward>
    pub async fn get_custom_rewards(
        &self,
        ctx: &CallContext,
        req: &GetCustomRewardsRequest,
    ) -> Result<HelixResponse<CustomReward>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .extend("id", req.ids.iter().map(String::as_str))
            .set_opt("only_manageable_rewards", req.only_manageable_rewards);

        let headers = self.headers(&req.options);
        self.request(Method::GET, CUSTOM_REWARDS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#create-custom-rewards>
    pub async fn create_custom_reward(
        &self,
        ctx: &CallContext,
        req: &CreateCustomRewardRequest,
    ) -> Result<HelixResponse<CustomReward>, TwitchError> {
        let mut query = Query::new();
        query.set("broadcaster_id", &req.broadcaster_id);

        let headers = self.headers(&req.options);
        self.request(Method::POST, CUSTOM_REWARDS_PATH, query, &headers)
            .body_json(req)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#update-custom-reward>
    pub async fn update_custom_reward(
        &self,
        ctx: &CallContext,
        req: &UpdateCustomRewardRequest,
    ) -> Result<HelixResponse<CustomReward>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set("id", &req.id);

        let headers = self.headers(&req.options);
        self.request(Method::PATCH, CUSTOM_REWARDS_PATH, query, &headers)
            .body_json(req)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#delete-custom-reward>
    pub async fn delete_custom_reward(
        &self,
        ctx: &CallContext,
        req: &DeleteCustomRewardRequest,
    ) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set("id", &req.id);

        let headers = self.headers(&req.options);
        self.request(Method::DELETE, CUSTOM_REWARDS_PATH, query, &headers)
            .execute(ctx)
            .await
            .without_body()
            .await
    }
}
