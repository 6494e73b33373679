use pulse_http::{build_url, ApiCredentials, HttpClient, HttpConfig, HttpError, HttpManager, PostRequest};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_post_json_sends_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dev/predict"))
        .and(header("content-type", "application/json"))
        .and(header("x-api-key", "secret"))
        .and(body_json(json!({"input": [1, 2, 3]})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success": true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpManager::new().unwrap();
    let url = build_url(&mock_server.uri(), "/dev/predict").unwrap();
    let request = PostRequest::json(url, json!({"input": [1, 2, 3]}))
        .credentials(&ApiCredentials::new(Some("secret".into()), None));

    let response = client.post_json(&request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"success": true}"#);
}

#[tokio::test]
async fn test_non_success_status_is_a_response_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = HttpManager::new().unwrap();
    let url = build_url(&mock_server.uri(), "/dev/predict").unwrap();
    let response = client.post_json(&PostRequest::json(url, json!({}))).await.unwrap();

    assert_eq!(response.status, 502);
    assert_eq!(response.body, "bad gateway");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = HttpManager::new().unwrap();
    // Nothing listens on port 1 on loopback.
    let url = build_url("http://127.0.0.1:1", "/dev/predict").unwrap();
    let err = client.post_json(&PostRequest::json(url, json!({}))).await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, HttpError::NetworkError(_)));
}

#[tokio::test]
async fn test_client_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        timeout: Duration::from_millis(200),
        connect_timeout: Duration::from_millis(200),
        ..HttpConfig::default()
    };
    let client = HttpManager::with_config(config).unwrap();
    let url = build_url(&mock_server.uri(), "/slow").unwrap();
    let err = client.post_json(&PostRequest::json(url, json!({}))).await.unwrap_err();

    assert!(err.is_timeout());
}
