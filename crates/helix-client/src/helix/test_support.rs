use wiremock::MockServer;

use super::{ClientOptions, HelixClient, RequestOptions};

pub(crate) fn test_client(server: &MockServer) -> HelixClient {
    HelixClient::new(ClientOptions {
        client_id: "client-id".into(),
        base_url: Some(format!("{}/helix", server.uri())),
        ..ClientOptions::default()
    })
    .expect("mock server uri is a valid base url")
}

pub(crate) fn request_options() -> RequestOptions {
    RequestOptions::with_token("abc123")
}

/// Query string of the only request the server received.
pub(crate) async fn single_query(server: &MockServer) -> Option<String> {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].url.query().map(str::to_owned)
}

/// JSON body of the only request the server received.
pub(crate) async fn single_body(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).expect("request body is JSON")
}
