// Publisher Post Service - /api/social-publisher-post (offset pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::offset_stream;
use crate::application::publishing::VideoPublisher;
use crate::domain::{
    Page, PageRequest, PostFilter, PublishOptions, PublishTarget, PublisherPost, VideoSource,
};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport, TimeProvider};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::info;

pub const POST_PATH: &str = "/api/social-publisher-post";

pub struct PublisherPostService {
    transport: Arc<dyn HttpTransport>,
    publisher: VideoPublisher,
}

impl PublisherPostService {
    pub fn new(transport: Arc<dyn HttpTransport>, time_provider: Arc<dyn TimeProvider>) -> Self {
        let publisher = VideoPublisher::new(Arc::clone(&transport), time_provider, POST_PATH);
        Self {
            transport,
            publisher,
        }
    }

    /// Publish a video directly on one connected account
    pub async fn publish(
        &self,
        account_id: &str,
        source: VideoSource,
        options: PublishOptions,
    ) -> Result<PublisherPost> {
        let target = PublishTarget::Account(account_id.to_string());
        let post: PublisherPost = self.publisher.publish(&target, source, options).await?;
        info!(post_id = %post.id, platform = %post.platform, "Post registered");
        Ok(post)
    }

    pub async fn publish_link(
        &self,
        account_id: &str,
        link: &str,
        options: PublishOptions,
    ) -> Result<PublisherPost> {
        let source = VideoSource::detect(link)?;
        self.publish(account_id, source, options).await
    }

    pub async fn get(&self, id: &str) -> Result<PublisherPost> {
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(POST_PATH, id)),
        )
        .await
    }

    pub async fn list(&self, page: PageRequest, filter: &PostFilter) -> Result<Page<PublisherPost>> {
        page.validate()?;
        let call = ApiRequest::get(POST_PATH)
            .extend_query(filter.to_query())
            .extend_query(page.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all<'a>(
        &'a self,
        filter: &'a PostFilter,
        page_size: u32,
    ) -> BoxStream<'a, Result<PublisherPost>> {
        offset_stream(PageRequest::new(0, page_size), move |page| {
            self.list(page, filter)
        })
    }

    /// Remove a post; published posts are also taken down on the platform
    pub async fn delete(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(POST_PATH, id)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Platform, PostStatus};
    use crate::error::SdkError;
    use crate::port::time_provider::FixedTimeProvider;
    use crate::port::transport::mocks::MockTransport;
    use crate::port::HttpMethod;
    use chrono::{TimeZone, Utc};
    use futures::TryStreamExt;
    use serde_json::json;

    fn service(transport: Arc<MockTransport>) -> PublisherPostService {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        PublisherPostService::new(transport, Arc::new(FixedTimeProvider(now)))
    }

    fn post(id: &str) -> serde_json::Value {
        json!({"id": id, "accountId": "acc-1", "platform": "tiktok", "status": "published"})
    }

    #[tokio::test]
    async fn test_publish_file_targets_account_endpoint() {
        let transport = Arc::new(
            MockTransport::new()
                .reply(json!({
                    "videoUploadUrl": "https://bucket.example/v",
                    "videoFileUrl": "https://cdn.example/v.mp4"
                }))
                .reply(post("p1")),
        );
        let posts = service(transport.clone());

        let created = posts
            .publish(
                "acc-1",
                VideoSource::file("clip.mp4", "video/mp4", vec![1u8; 8]),
                PublishOptions::default().caption("#bakery"),
            )
            .await
            .unwrap();
        assert_eq!(created.status, PostStatus::Published);
        assert_eq!(created.platform, Platform::TikTok);

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/api/social-publisher-post/upload-urls");
        assert_eq!(requests[1].path, "/api/social-publisher-post/account/acc-1/by-file");
        assert_eq!(requests[1].body.as_ref().unwrap()["caption"], "#bakery");
        assert_eq!(transport.uploads().len(), 1);
    }

    #[tokio::test]
    async fn test_youtube_short_is_repost() {
        let transport = Arc::new(MockTransport::new().reply(post("p2")));
        let posts = service(transport.clone());

        posts
            .publish_link(
                "acc-1",
                "https://youtube.com/shorts/abc123XYZ",
                PublishOptions::default(),
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/social-publisher-post/account/acc-1/by-url");
        assert_eq!(request.body.as_ref().unwrap()["sourceType"], "repost");
    }

    #[tokio::test]
    async fn test_rejects_non_video_file() {
        let transport = Arc::new(MockTransport::new());
        let posts = service(transport.clone());

        let err = posts
            .publish(
                "acc-1",
                VideoSource::file("notes.txt", "text/plain", vec![1u8; 8]),
                PublishOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SdkError::Domain(DomainError::InvalidContentType { .. })
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_all_walks_pages_with_filter() {
        let transport = Arc::new(
            MockTransport::new()
                .reply(json!({"items": [post("p1"), post("p2")], "totalCount": 3, "page": 0, "pageSize": 2}))
                .reply(json!({"items": [post("p3")], "totalCount": 3, "page": 1, "pageSize": 2})),
        );
        let posts = service(transport.clone());
        let filter = PostFilter {
            platform: Some(Platform::TikTok),
            ..Default::default()
        };

        let all: Vec<PublisherPost> = posts.list_all(&filter, 2).try_collect().await.unwrap();
        assert_eq!(all.len(), 3);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query_value("page"), Some("1"));
        assert_eq!(requests[1].query_value("platform"), Some("tiktok"));
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = Arc::new(MockTransport::new().reply(serde_json::Value::Null));
        let posts = service(transport.clone());

        posts.delete("p1").await.unwrap();
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/api/social-publisher-post/p1");
    }
}
