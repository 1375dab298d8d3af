use super::models::{HelixPaginatedResponse, Stream};
use super::*;

const STREAMS_PATH: &str = "/streams";

/// Live streams, most viewers first. Filters combine; with none, all live
/// streams are listed.
#[derive(Debug, Clone, Default)]
pub struct GetStreamsRequest {
    pub options: RequestOptions,
    /// At most 100.
    pub user_ids: Vec<String>,
    /// At most 100.
    pub user_logins: Vec<String>,
    /// At most 100.
    pub game_ids: Vec<String>,
    /// `all` or `live`.
    pub stream_type: Option<String>,
    /// ISO 639-1 codes or `other`, at most 100.
    pub languages: Vec<String>,
    /// Page size, at most 100. Default 20.
    pub first: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl HelixClient {
    /// <https://dev.twitch.tv/docs/api/reference#get-streams>
    pub async fn get_streams(
        &self,
        ctx: &CallContext,
        req: &GetStreamsRequest,
    ) -> Result<HelixPaginatedResponse<Stream>, TwitchError> {
        let mut query = Query::new();
        query
            .extend("user_id", req.user_ids.iter().map(String::as_str))
            .extend("user_login", req.user_logins.iter().map(String::as_str))
            .extend("game_id", req.game_ids.iter().map(String::as_str))
            .set_opt("type", req.stream_type.as_deref())
            .extend("language", req.languages.iter().map(String::as_str))
            .set_opt("first", req.first.filter(|first| *first > 0))
            .set_opt("before", req.before.as_deref())
            .set_opt("after", req.after.as_deref());

        let headers = self.headers(&req.options);
        self.request(Method::GET, STREAMS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}
