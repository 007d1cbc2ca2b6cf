// Publisher Task Service - /api/social-publisher-task (cursor pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::cursor_stream;
use crate::application::publishing::VideoPublisher;
use crate::domain::{
    CursorPage, CursorRequest, PublishOptions, PublishTarget, PublisherTask, TaskFilter,
    VideoSource,
};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport, TimeProvider};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::info;

pub const TASK_PATH: &str = "/api/social-publisher-task";

pub struct PublisherTaskService {
    transport: Arc<dyn HttpTransport>,
    publisher: VideoPublisher,
}

impl PublisherTaskService {
    pub fn new(transport: Arc<dyn HttpTransport>, time_provider: Arc<dyn TimeProvider>) -> Self {
        let publisher = VideoPublisher::new(Arc::clone(&transport), time_provider, TASK_PATH);
        Self {
            transport,
            publisher,
        }
    }

    /// Publish a short video to a workspace or a single account
    ///
    /// The endpoint variant follows from the source: files go through the
    /// pre-signed upload flow and `by-file`, URLs and reposts go to `by-url`.
    pub async fn publish(
        &self,
        target: PublishTarget,
        source: VideoSource,
        options: PublishOptions,
    ) -> Result<PublisherTask> {
        let task: PublisherTask = self.publisher.publish(&target, source, options).await?;
        info!(task_id = %task.id, status = %task.status, "Task registered");
        Ok(task)
    }

    /// Publish from a string source, classifying it as repost or URL
    pub async fn publish_link(
        &self,
        target: PublishTarget,
        link: &str,
        options: PublishOptions,
    ) -> Result<PublisherTask> {
        let source = VideoSource::detect(link)?;
        self.publish(target, source, options).await
    }

    pub async fn get(&self, id: &str) -> Result<PublisherTask> {
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(TASK_PATH, id)),
        )
        .await
    }

    pub async fn list(
        &self,
        cursor: CursorRequest,
        filter: &TaskFilter,
    ) -> Result<CursorPage<PublisherTask>> {
        cursor.validate()?;
        let call = ApiRequest::get(TASK_PATH)
            .extend_query(filter.to_query())
            .extend_query(cursor.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all<'a>(
        &'a self,
        filter: &'a TaskFilter,
        page_size: u32,
    ) -> BoxStream<'a, Result<PublisherTask>> {
        cursor_stream(page_size, move |cursor| self.list(cursor, filter))
    }

    /// Cancel a task that has not been published yet
    pub async fn cancel(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(TASK_PATH, id)),
        )
        .await
    }
}
