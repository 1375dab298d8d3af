use super::*;
use crate::auth::HelixHeaders;
use crate::client::{Request, RequestConfig};

impl HelixClient {
    /// Absolute URL for a Helix path such as `/users`.
    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Header strategy for one call: the request's own token, falling back
    /// to the configured loader.
    pub(super) fn headers<'a>(&'a self, options: &'a RequestOptions) -> HelixHeaders<'a> {
        HelixHeaders {
            client_id: &self.client_id,
            token: options.token.as_deref(),
            loader: self.access_token_loader.as_deref(),
        }
    }

    pub(super) fn request<'a>(
        &'a self,
        method: Method,
        path: &str,
        query: Query,
        headers: &'a HelixHeaders<'a>,
    ) -> Request<'a> {
        self.http.request(RequestConfig {
            method,
            url: self.endpoint(path),
            query,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::token_loader_fn;
    use crate::helix::test_support::{request_options, test_client};

    #[tokio::test]
    async fn test_requests_carry_client_id_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/helix/users"))
            .and(header("client-id", "client-id"))
            .and(header("authorization", "Bearer abc123"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let options = request_options();
        let headers = client.headers(&options);
        client
            .request(Method::GET, "/users", Query::new(), &headers)
            .execute(&CallContext::background())
            .await
            .without_body()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_loader_supplies_token_when_request_has_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer app-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HelixClient::new(
            ClientOptions {
                client_id: "client-id".into(),
                base_url: Some(format!("{}/helix", server.uri())),
                ..ClientOptions::default()
            }
            .with_access_token_loader(token_loader_fn(|_| async { Ok("app-token".to_owned()) })),
        )
        .unwrap();

        let options = RequestOptions::default();
        let headers = client.headers(&options);
        client
            .request(Method::GET, "/users", Query::new(), &headers)
            .execute(&CallContext::background())
            .await
            .without_body()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let options = RequestOptions::default();
        let headers = client.headers(&options);
        client
            .request(Method::GET, "/users", Query::new(), &headers)
            .execute(&CallContext::background())
            .await
            .without_body()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
        assert_eq!(requests[0].headers["client-id"], "client-id");
    }
}
