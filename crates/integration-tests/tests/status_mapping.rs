//! HTTP status to error mapping through the full client stack

mod common;

use mockito::Server;
use pubhub_sdk::{ClientConfig, PubhubClient, SdkError};
use std::time::Duration;

async fn short_link_error(status: usize, body: &str) -> SdkError {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/short-link/l1")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    common::client(&server)
        .short_links()
        .get("l1")
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_auth_failures() {
    let err = short_link_error(401, "invalid api key").await;
    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some("invalid api key"));

    let err = short_link_error(403, "forbidden").await;
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_not_found() {
    let err = short_link_error(404, r#"{"isSuccess":false,"message":"not found"}"#).await;
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_validation_uses_envelope_message() {
    let err = short_link_error(400, r#"{"isSuccess":false,"message":"slug already taken"}"#).await;
    match err {
        SdkError::Validation {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "slug already taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/short-link/l1")
        .with_status(429)
        .with_header("retry-after", "30")
        .create_async()
        .await;

    let err = common::client(&server)
        .short_links()
        .get("l1")
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
    assert!(matches!(
        err,
        SdkError::RateLimited {
            retry_after: Some(30),
            ..
        }
    ));
}

#[tokio::test]
async fn test_server_error_is_api_error_and_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/short-link/l1")
        .with_status(503)
        .with_body("maintenance")
        .expect(1)
        .create_async()
        .await;

    let config = ClientConfig::new(common::API_KEY)
        .with_base_url(server.url())
        .with_retry_count(3)
        .with_retry_delay(Duration::from_millis(1));
    let err = PubhubClient::with_config(config)
        .unwrap()
        .short_links()
        .get("l1")
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Api { status: 503, .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unsuccessful_envelope_with_exception() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/short-link/l1")
        .with_status(200)
        .with_body(r#"{"isSuccess":false,"message":"quota exceeded","exception":{"code":"QUOTA"}}"#)
        .create_async()
        .await;

    let err = common::client(&server)
        .short_links()
        .get("l1")
        .await
        .unwrap_err();
    match err {
        SdkError::Unsuccessful { message, exception } => {
            assert_eq!(message, "quota exceeded");
            assert_eq!(exception.unwrap()["code"], "QUOTA");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_result() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/short-link/l1")
        .with_status(200)
        .with_body(r#"{"isSuccess":true,"message":"ok"}"#)
        .create_async()
        .await;

    let err = common::client(&server)
        .short_links()
        .get("l1")
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::MissingResult));
}

#[tokio::test]
async fn test_variable_set_creates_on_not_found() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", "/api/html-hosting-variable/var_theme")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/html-hosting-variable")
        .with_status(200)
        .with_body(common::ok(serde_json::json!({"key": "var_theme", "value": "dark"})))
        .expect(1)
        .create_async()
        .await;

    let variable = common::client(&server)
        .variables()
        .set("var_theme", "dark")
        .await
        .unwrap();
    assert_eq!(variable.value, "dark");

    update.assert_async().await;
    create.assert_async().await;
}
