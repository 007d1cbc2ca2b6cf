//! Shared helpers for end-to-end tests against a mockito server

#![allow(dead_code)]

use pubhub_sdk::{ClientConfig, PubhubClient};
use serde_json::{json, Value};
use std::time::Duration;

pub const API_KEY: &str = "pk_test_123";

pub fn client(server: &mockito::ServerGuard) -> PubhubClient {
    let config = ClientConfig::new(API_KEY)
        .with_base_url(server.url())
        .with_retry_count(0)
        .with_retry_delay(Duration::from_millis(1));
    PubhubClient::with_config(config).unwrap()
}

/// Successful envelope around `result`
pub fn ok(result: Value) -> String {
    json!({"message": "ok", "isSuccess": true, "result": result}).to_string()
}

/// Mocks that fail `assert_async` if any request reaches the server
pub async fn forbid_requests(server: &mut mockito::ServerGuard) -> Vec<mockito::Mock> {
    let mut guards = Vec::new();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        guards.push(
            server
                .mock(method, mockito::Matcher::Any)
                .expect(0)
                .create_async()
                .await,
        );
    }
    guards
}

pub async fn assert_untouched(guards: Vec<mockito::Mock>) {
    for guard in guards {
        guard.assert_async().await;
    }
}
