use chrono::{DateTime, SecondsFormat, Utc};

use super::models::{ExtensionAnalytic, GameAnalytic, HelixPaginatedResponse};
use super::*;

const EXTENSION_ANALYTICS_PATH: &str = "/analytics/extensions";
const GAME_ANALYTICS_PATH: &str = "/analytics/games";

/// Report dates are sent as RFC 3339 in UTC, e.g. `2018-05-01T00:00:00Z`.
fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Query parameters shared by both analytics endpoints.
fn report_query(
    id_key: &str,
    id: Option<&str>,
    after: Option<&str>,
    report_type: Option<&str>,
    first: Option<u32>,
    started_at: Option<&DateTime<Utc>>,
    ended_at: Option<&DateTime<Utc>>,
) -> Query {
    let mut query = Query::new();
    query
        .set_opt("after", after)
        .set_opt(id_key, id)
        .set_opt("type", report_type)
        .set_opt("first", first.filter(|first| *first > 0))
        .set_opt("started_at", started_at.map(rfc3339))
        .set_opt("ended_at", ended_at.map(rfc3339));
    query
}

#[derive(Debug, Clone, Default)]
pub struct GetExtensionAnalyticsRequest {
    pub options: RequestOptions,

    /// Forward pagination cursor. Ignored when `extension_id` is set.
    pub after: Option<String>,

    /// Limit the report to one extension.
    pub extension_id: Option<String>,

    /// Report type. Only `overview_v2` exists today.
    pub report_type: Option<String>,

    /// Page size, at most 100. Default 20.
    pub first: Option<u32>,

    /// Report start; requires `ended_at`.
    pub started_at: Option<DateTime<Utc>>,

    /// Report end; requires `started_at`.
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct GetGameAnalyticsRequest {
    pub options: RequestOptions,

    /// Forward pagination cursor. Ignored when `game_id` is set.
    pub after: Option<String>,

    /// Limit the report to one game.
    pub game_id: Option<String>,

    /// Report type. Only `overview_v2` exists today.
    pub report_type: Option<String>,

    /// Page size, at most 100. Default 20.
    pub first: Option<u32>,

    pub started_at: Option<DateTime<Utc>>,

    pub ended_at: Option<DateTime<Utc>>,
}

impl HelixClient {
    /// Get download URLs for extension analytics reports.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#get-extension-analytics>
    pub async fn get_extension_analytics(
        &self,
        ctx: &CallContext,
        req: &GetExtensionAnalyticsRequest,
    ) -> Result<HelixPaginatedResponse<ExtensionAnalytic>, TwitchError> {
        let query = report_query(
            "extension_id",
            req.extension_id.as_deref(),
            req.after.as_deref(),
            req.report_type.as_deref(),
            req.first,
            req.started_at.as_ref(),
            req.ended_at.as_ref(),
        );

        let headers = self.headers(&req.options);
        self.request(Method::GET, EXTENSION_ANALYTICS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }

    /// Get download URLs for game analytics reports.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#get-game-analytics>
    pub async fn get_game_analytics(
        &self,
        ctx: &CallContext,
        req: &GetGameAnalyticsRequest,
    ) -> Result<HelixPaginatedResponse<GameAnalytic>, TwitchError> {
        let query = report_query(
            "game_id",
            req.game_id.as_deref(),
            req.after.as_deref(),
            req.report_type.as_deref(),
            req.first,
            req.started_at.as_ref(),
            req.ended_at.as_ref(),
        );

        let headers = self.headers(&req.options);
        self.request(Method::GET, GAME_ANALYTICS_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::helix::test_support::{request_options, single_query, test_client};

    #[test]
    fn test_dates_are_formatted_as_utc_seconds() {
        let at = Utc.with_ymd_and_hms(2018, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(rfc3339(&at), "2018-05-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_extension_analytics_sends_all_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/helix/analytics/extensions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "extension_id": "efgh",
                    "URL": "https://twitch-piper-reports.s3-us-west-2.amazonaws.com/dynamic/LoL%20ADC",
                    "type": "overview_v2",
                    "date_range": {
                        "started_at": "2018-03-01T00:00:00Z",
                        "ended_at": "2018-06-01T00:00:00Z"
                    }
                }],
                "pagination": {"cursor": "next"}
            })))
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .get_extension_analytics(
                &CallContext::background(),
                &GetExtensionAnalyticsRequest {
                    options: request_options(),
                    after: Some("cursor".into()),
                    extension_id: Some("efgh".into()),
                    report_type: Some("overview_v2".into()),
                    first: Some(5),
                    started_at: Some(Utc.with_ymd_and_hms(2018, 3, 1, 0, 0, 0).unwrap()),
                    ended_at: Some(Utc.with_ymd_and_hms(2018, 6, 1, 0, 0, 0).unwrap()),
                },
            )
            .await
            .unwrap();

        assert_eq!(resp.data[0].extension_id, "efgh");
        assert_eq!(resp.data[0].report_type, "overview_v2");
        assert!(resp.data[0].url.starts_with("https://"));
        assert_eq!(resp.pagination.next(), Some("next"));
        assert_eq!(
            single_query(&server).await.as_deref(),
            Some(
                "after=cursor&ended_at=2018-06-01T00%3A00%3A00Z&extension_id=efgh&first=5\
                 &started_at=2018-03-01T00%3A00%3A00Z&type=overview_v2"
            )
        );
    }

    #[tokio::test]
    async fn test_game_analytics_without_filters_sends_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/helix/analytics/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"game_id": "493057", "URL": "https://example.com/report.csv", "type": "overview_v2"}]
            })))
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .get_game_analytics(
                &CallContext::background(),
                &GetGameAnalyticsRequest {
                    options: request_options(),
                    first: Some(0),
                    ..GetGameAnalyticsRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(resp.data[0].game_id, "493057");
        assert_eq!(resp.pagination.next(), None);
        assert_eq!(single_query(&server).await, None);
    }
}
