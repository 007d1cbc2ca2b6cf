// Short Link Service - /api/short-link (offset pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::offset_stream;
use crate::domain::{
    CreateShortLink, Page, PageRequest, ShortLink, ShortLinkStats, UpdateShortLink,
};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::debug;

pub const SHORT_LINK_PATH: &str = "/api/short-link";

pub struct ShortLinkService {
    transport: Arc<dyn HttpTransport>,
}

impl ShortLinkService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: CreateShortLink) -> Result<ShortLink> {
        request.validate()?;
        debug!(destination = %request.destination_url, "Creating short link");
        let call = ApiRequest::post(SHORT_LINK_PATH).json(&request)?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn get(&self, id: &str) -> Result<ShortLink> {
        let call = ApiRequest::get(resource_path(SHORT_LINK_PATH, id));
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<ShortLink>> {
        page.validate()?;
        let call = ApiRequest::get(SHORT_LINK_PATH).extend_query(page.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all(&self, page_size: u32) -> BoxStream<'_, Result<ShortLink>> {
        offset_stream(PageRequest::new(0, page_size), move |page| self.list(page))
    }

    pub async fn update(&self, id: &str, request: UpdateShortLink) -> Result<ShortLink> {
        request.validate()?;
        let call = ApiRequest::put(resource_path(SHORT_LINK_PATH, id)).json(&request)?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(SHORT_LINK_PATH, id)),
        )
        .await
    }

    /// Click statistics
    pub async fn stats(&self, id: &str) -> Result<ShortLinkStats> {
        let path = format!("{}/stats", resource_path(SHORT_LINK_PATH, id));
        fetch(self.transport.as_ref(), ApiRequest::get(path)).await
    }
}
