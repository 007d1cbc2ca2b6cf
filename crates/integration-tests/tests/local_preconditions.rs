//! Local precondition tests
//!
//! Invalid input must be rejected before any request leaves the process.

mod common;

use chrono::{Duration, Utc};
use mockito::{Matcher, Server};
use pubhub_sdk::{
    CreateQrCode, CreateShortLink, DomainError, Platform, PublishOptions, PublishTarget,
    SdkError, VideoSource, VARIABLE_KEY_PREFIX,
};

/// A key without the required literal prefix never reaches the network
#[tokio::test]
async fn test_variable_key_without_prefix_rejected_before_network() {
    let mut server = Server::new_async().await;
    let guards = common::forbid_requests(&mut server).await;
    let client = common::client(&server);

    for key in ["greeting", "VAR_greeting", "var_", "var_has-dash", "xvar_greeting"] {
        let err = client.variables().create(key, "hello").await.unwrap_err();
        assert!(
            matches!(
                err,
                SdkError::Domain(DomainError::InvalidVariableKey { prefix, .. }) if prefix == VARIABLE_KEY_PREFIX
            ),
            "key {key:?} should be rejected locally"
        );
        assert!(err.is_local());
    }
    assert!(client.variables().get("greeting").await.is_err());
    assert!(client.variables().set("greeting", "x").await.is_err());
    assert!(client.variables().delete("greeting").await.is_err());

    common::assert_untouched(guards).await;
}

#[tokio::test]
async fn test_valid_variable_key_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/html-hosting-variable")
        .match_body(Matcher::Json(serde_json::json!({"key": "var_greeting", "value": "hello"})))
        .with_status(200)
        .with_body(common::ok(serde_json::json!({"key": "var_greeting", "value": "hello"})))
        .create_async()
        .await;

    let variable = common::client(&server)
        .variables()
        .create("var_greeting", "hello")
        .await
        .unwrap();
    assert_eq!(variable.value, "hello");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_server() {
    let mut server = Server::new_async().await;
    let guards = common::forbid_requests(&mut server).await;
    let client = common::client(&server);

    // Bad color
    let qr = CreateQrCode::new("Menu", "https://example.com").colors("red", "#FFFFFF");
    assert!(client.qr_codes().create(qr).await.unwrap_err().is_local());

    // Not a URL
    let link = CreateShortLink::new("example.com/no-scheme");
    assert!(client.short_links().create(link).await.unwrap_err().is_local());

    // Page size out of range
    let err = client
        .qr_codes()
        .list(pubhub_sdk::PageRequest::new(0, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Domain(DomainError::InvalidPageSize { size: 0, .. })
    ));

    // Schedule in the past
    let err = client
        .tasks()
        .publish(
            PublishTarget::Workspace("ws-1".to_string()),
            VideoSource::Url("https://cdn.example.com/v.mp4".to_string()),
            PublishOptions::default()
                .platform(Platform::YouTube)
                .schedule_at(Utc::now() - Duration::hours(1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Domain(DomainError::ScheduleInPast(_))
    ));

    common::assert_untouched(guards).await;
}

/// TikTok video links are reposts, not plain URLs
#[test]
fn test_tiktok_links_classified_as_repost() {
    for url in [
        "https://www.tiktok.com/@bakery/video/7301234567890123456",
        "https://tiktok.com/@some.user/video/123",
        "https://vm.tiktok.com/ZMabc123/",
        "https://www.tiktok.com/t/ZTRabc/",
    ] {
        match VideoSource::detect(url).unwrap() {
            VideoSource::Repost { platform, .. } => assert_eq!(platform, Platform::TikTok),
            other => panic!("{url} classified as {other:?}"),
        }
    }
}

#[test]
fn test_other_repost_platforms_and_plain_urls() {
    assert_eq!(
        VideoSource::repost_platform("https://www.facebook.com/reel/1234567890"),
        Some(Platform::Facebook)
    );
    assert_eq!(
        VideoSource::repost_platform("https://fb.watch/abcDEF/"),
        Some(Platform::Facebook)
    );
    assert_eq!(
        VideoSource::repost_platform("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
        Some(Platform::YouTube)
    );

    // Regular YouTube watch pages and TikTok profiles are not reposts
    assert!(matches!(
        VideoSource::detect("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
        VideoSource::Url(_)
    ));
    assert!(matches!(
        VideoSource::detect("https://www.tiktok.com/@bakery").unwrap(),
        VideoSource::Url(_)
    ));
    assert!(VideoSource::detect("ftp://files.example.com/v.mp4").is_err());
}
