use serde::Serialize;

use super::models::{
    ActiveExtensions, ActiveExtensionsResponse, HelixPaginatedResponse, HelixResponse, User,
    UserBlock, UserExtension, UserFollow,
};
use super::*;

const USERS_PATH: &str = "/users";
const USER_FOLLOWS_PATH: &str = "/users/follows";
const USER_BLOCKS_PATH: &str = "/users/blocks";
const USER_EXTENSIONS_LIST_PATH: &str = "/users/extensions/list";
const USER_EXTENSIONS_PATH: &str = "/users/extensions";

/// Look up users by ID and/or login, at most 100 combined. With neither,
/// Helix returns the user the token belongs to.
#[derive(Debug, Clone, Default)]
pub struct GetUsersRequest {
    pub options: RequestOptions,
    pub ids: Vec<String>,
    pub logins: Vec<String>,
}

/// Follow relationships. At least one of `from_id` and `to_id` is required.
#[derive(Debug, Clone, Default)]
pub struct GetUserFollowsRequest {
    pub options: RequestOptions,
    pub after: Option<String>,
    pub from_id: Option<String>,
    pub to_id: Option<String>,
    /// Page size, at most 100. Default 20.
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct GetUserBlocksRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
    pub after: Option<String>,
    /// Page size, at most 100. Default 20.
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockUserRequest {
    pub options: RequestOptions,
    pub target_user_id: String,
    /// `chat` or `whisper`.
    pub source_context: Option<String>,
    /// `spam`, `harassment` or `other`.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UnblockUserRequest {
    pub options: RequestOptions,
    pub target_user_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub options: RequestOptions,
    /// New channel description, up to 300 characters. Empty clears it.
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetUserExtensionsRequest {
    pub options: RequestOptions,
}

#[derive(Debug, Clone, Default)]
pub struct GetUserActiveExtensionsRequest {
    pub options: RequestOptions,
    /// Defaults to the token's user when `None`.
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserExtensionsRequest {
    pub options: RequestOptions,
    pub extensions: ActiveExtensions,
}

#[derive(Serialize)]
struct UpdateUserExtensionsBody<'a> {
    data: &'a ActiveExtensions,
}

impl HelixClient {
    /// <https://dev.twitch.tv/docs/api/reference#get-users>
    pub async fn get_users(
        &self,
        ctx: &CallContext,
        req: &GetUsersRequest,
    ) -> Result<HelixResponse<User>, TwitchError> {
        let mut query = Query::new();
        query
            .extend("id", req.ids.iter().map(String::as_str))
            .extend("login", req.logins.iter().map(String::as_str));

        let headers = self.headers(&req.options);
        self.request(Method::GET, USERS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-users-follows>
    pub async fn get_user_follows(
        &self,
        ctx: &CallContext,
        req: &GetUserFollowsRequest,
    ) -> Result<HelixPaginatedResponse<UserFollow>, TwitchError> {
        let mut query = Query::new();
        query
            .set_opt("after", req.after.as_deref())
            .set_opt("first", req.first.filter(|first| *first > 0))
            .set_opt("from_id", req.from_id.as_deref())
            .set_opt("to_id", req.to_id.as_deref());

        let headers = self.headers(&req.options);
        self.request(Method::GET, USER_FOLLOWS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-user-block-list>
    pub async fn get_user_blocks(
        &self,
        ctx: &CallContext,
        req: &GetUserBlocksRequest,
    ) -> Result<HelixPaginatedResponse<UserBlock>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set_opt("after", req.after.as_deref())
            .set_opt("first", req.first.filter(|first| *first > 0));

        let headers = self.headers(&req.options);
        self.request(Method::GET, USER_BLOCKS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#block-user>
    pub async fn block_user(&self, ctx: &CallContext, req: &BlockUserRequest) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query
            .set("target_user_id", &req.target_user_id)
            .set_opt("source_context", req.source_context.as_deref())
            .set_opt("reason", req.reason.as_deref());

        let headers = self.headers(&req.options);
        self.request(Method::PUT, USER_BLOCKS_PATH, query, &headers)
            .execute(ctx)
            .await
            .without_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#unblock-user>
    pub async fn unblock_user(
        &self,
        ctx: &CallContext,
        req: &UnblockUserRequest,
    ) -> Result<(), TwitchError> {
        let mut query = Query::new();
        query.set("target_user_id", &req.target_user_id);

        let headers = self.headers(&req.options);
        self.request(Method::DELETE, USER_BLOCKS_PATH, query, &headers)
            .execute(ctx)
            .await
            .without_body()
            .await
    }

    /// Update the token user's channel description.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#update-user>
    pub async fn update_user(
        &self,
        ctx: &CallContext,
        req: &UpdateUserRequest,
    ) -> Result<HelixResponse<User>, TwitchError> {
        let mut query = Query::new();
        query.set("description", &req.description);

        let headers = self.headers(&req.options);
        self.request(Method::PUT, USERS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// Extensions the token user has installed.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#get-user-extensions>
    pub async fn get_user_extensions(
        &self,
        ctx: &CallContext,
        req: &GetUserExtensionsRequest,
    ) -> Result<HelixResponse<UserExtension>, TwitchError> {
        let headers = self.headers(&req.options);
        self.request(Method::GET, USER_EXTENSIONS_LIST_PATH, Query::new(), &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// <https://dev.twitch.tv/docs/api/reference#get-user-active-extensions>
    pub async fn get_user_active_extensions(
        &self,
        ctx: &CallContext,
        req: &GetUserActiveExtensionsRequest,
    ) -> Result<ActiveExtensionsResponse, TwitchError> {
        let mut query = Query::new();
        query.set_opt("user_id", req.user_id.as_deref());

        let headers = self.headers(&req.options);
        self.request(Method::GET, USER_EXTENSIONS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// Replace the token user's active extension layout.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#update-user-extensions>
    pub async fn update_user_extensions(
        &self,
        ctx: &CallContext,
        req: &UpdateUserExtensionsRequest,
    ) -> Result<ActiveExtensionsResponse, TwitchError> {
        let headers = self.headers(&req.options);
        self.request(Method::PUT, USER_EXTENSIONS_PATH, Query::new(), &headers)
            .body_json(&UpdateUserExtensionsBody {
                data: &req.extensions,
            })
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}
