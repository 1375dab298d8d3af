use serde::Serialize;

use super::models::{Commercial, HelixResponse};
use super::*;

const COMMERCIAL_PATH: &str = "/channels/commercial";

#[derive(Debug, Clone, Default)]
pub struct StartCommercialRequest {
    pub options: RequestOptions,

    /// Channel to run the commercial on.
    pub broadcaster_id: String,

    /// Commercial length in seconds: 30, 60, 90, 120, 150 or 180.
    pub length: u32,
}

#[derive(Serialize)]
struct StartCommercialBody<'a> {
    broadcaster_id: &'a str,
    length: u32,
}

impl HelixClient {
    /// Start a commercial on a channel.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#start-commercial>
    pub async fn start_commercial(
        &self,
        ctx: &CallContext,
        req: &StartCommercialRequest,
    ) -> Result<HelixResponse<Commercial>, TwitchError> {
        let headers = self.headers(&req.options);
        self.request(Method::POST, COMMERCIAL_PATH, Query::new(), &headers)
            .body_json(&StartCommercialBody {
                broadcaster_id: &req.broadcaster_id,
                length: req.length,
            })
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::helix::test_support::{request_options, single_body, single_query, test_client};

    #[tokio::test]
    async fn test_start_commercial_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/helix/channels/commercial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"length": 60, "message": "", "retry_after": 480}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let resp = client
            .start_commercial(
                &CallContext::background(),
                &StartCommercialRequest {
                    options: request_options(),
                    broadcaster_id: "broadcasterID".into(),
                    length: 60,
                },
            )
            .await
            .unwrap();

        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].retry_after, 480);
        assert_eq!(
            single_body(&server).await,
            serde_json::json!({"broadcaster_id": "broadcasterID", "length": 60})
        );
        assert_eq!(single_query(&server).await, None);
    }

    #[tokio::test]
    async fn test_start_commercial_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Bad Request",
                "status": 400,
                "message": "To start a commercial, the broadcaster must be streaming live."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .start_commercial(
                &CallContext::background(),
                &StartCommercialRequest {
                    options: request_options(),
                    broadcaster_id: "1".into(),
                    length: 30,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "[400] To start a commercial, the broadcaster must be streaming live."
        );
    }
}
