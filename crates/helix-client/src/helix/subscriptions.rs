use super::models::{HelixResponse, UserSubscription};
use super::*;

const USER_SUBSCRIPTION_PATH: &str = "/subscriptions/user";

#[derive(Debug, Clone, Default)]
pub struct CheckUserSubscriptionRequest {
    pub options: RequestOptions,
    pub broadcaster_id: String,
    /// Must match the token's user.
    pub user_id: String,
}

impl HelixClient {
    /// Check whether a user subscribes to a broadcaster.
    ///
    /// Helix answers 404 when there is no subscription; that surfaces as
    /// [`TwitchError::Api`] with status 404.
    ///
    /// <https://dev.twitch.tv/docs/api/reference#check-user-subscription>
    pub async fn check_user_subscription(
        &self,
        ctx: &CallContext,
        req: &CheckUserSubscriptionRequest,
    ) -> Result<HelixResponse<UserSubscription>, TwitchError> {
        let mut query = Query::new();
        query
            .set("broadcaster_id", &req.broadcaster_id)
            .set("user_id", &req.user_id);

        let headers = self.headers(&req.options);
        self.request(Method::GET, USER_SUBSCRIPTION_PATH, query, &headers)
            .execute(ctx)
            .await
            .with_body()
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::helix::test_support::{request_options, test_client};

    fn request() -> CheckUserSubscriptionRequest {
        CheckUserSubscriptionRequest {
            options: request_options(),
            broadcaster_id: "149747285".into(),
            user_id: "141981764".into(),
        }
    }

    #[tokio::test]
    async fn test_gifted_subscription_decodes_gifter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/helix/subscriptions/user"))
            .and(query_param("broadcaster_id", "149747285"))
            .and(query_param("user_id", "141981764"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "broadcaster_id": "149747285",
                    "broadcaster_name": "TwitchPresents",
                    "broadcaster_login": "twitchpresents",
                    "is_gift": true,
                    "gifter_id": "12826",
                    "gifter_login": "twitch",
                    "gifter_name": "Twitch",
                    "tier": "1000"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .check_user_subscription(&CallContext::background(), &request())
            .await
            .unwrap();

        let sub = &resp.data[0];
        assert!(sub.is_gift);
        assert_eq!(sub.gifter_login.as_deref(), Some("twitch"));
        assert_eq!(sub.tier, "1000");
    }

    #[tokio::test]
    async fn test_missing_subscription_is_a_404_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/helix/subscriptions/user"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "Not Found",
                "status": 404,
                "message": "twitch has no subscription to twitchpresents"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .check_user_subscription(&CallContext::background(), &request())
            .await
            .unwrap_err();

        assert_eq!(err.api_error().map(|api| api.status()), Some(404));
    }
}
