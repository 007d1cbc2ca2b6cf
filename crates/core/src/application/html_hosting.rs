// HTML Hosting Service - /api/html-hosting (offset pagination)
//
// Page content never flows through the API backend: the backend hands out a
// pre-signed URL and the bytes are PUT straight to object storage.

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::offset_stream;
use crate::domain::{
    CreateHtmlPage, DomainError, HtmlPage, HtmlUploadTicket, Page, PageRequest, UpdateHtmlPage,
};
use crate::error::{Result, SdkError};
use crate::port::{ApiRequest, HttpTransport, ObjectUpload};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::{debug, info};

pub const HTML_HOSTING_PATH: &str = "/api/html-hosting";

pub struct HtmlHostingService {
    transport: Arc<dyn HttpTransport>,
}

impl HtmlHostingService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Register page metadata, then upload its content
    ///
    /// If the upload fails the page record created in the first step is
    /// left in place; the upload error is returned.
    pub async fn create(&self, request: CreateHtmlPage, content: Vec<u8>) -> Result<HtmlPage> {
        request.validate()?;
        if content.is_empty() {
            return Err(DomainError::Validation("page content is empty".to_string()).into());
        }

        let call = ApiRequest::post(HTML_HOSTING_PATH).json(&request)?;
        let ticket: HtmlUploadTicket = fetch(self.transport.as_ref(), call).await?;
        info!(page_id = %ticket.page.id, bytes = content.len(), "Page registered, uploading content");

        self.upload_content(ticket, &request.content_type, content)
            .await
    }

    /// Host a single HTML document as `index.html`
    pub async fn create_from_html(
        &self,
        name: impl Into<String>,
        html: impl Into<String>,
    ) -> Result<HtmlPage> {
        let request = CreateHtmlPage::html(name, "index.html");
        self.create(request, html.into().into_bytes()).await
    }

    /// Update metadata and, when `content` is given, replace the page content
    pub async fn update(
        &self,
        id: &str,
        request: UpdateHtmlPage,
        content: Option<Vec<u8>>,
    ) -> Result<HtmlPage> {
        request.validate()?;
        if request.replaces_content() != content.is_some() {
            return Err(DomainError::Validation(
                "new content requires file name and content type, and vice versa".to_string(),
            )
            .into());
        }

        let call = ApiRequest::put(resource_path(HTML_HOSTING_PATH, id)).json(&request)?;
        let ticket: HtmlUploadTicket = fetch(self.transport.as_ref(), call).await?;

        match (content, request.content_type.as_deref()) {
            (Some(bytes), Some(content_type)) => {
                self.upload_content(ticket, content_type, bytes).await
            }
            _ => Ok(ticket.page),
        }
    }

    pub async fn get(&self, id: &str) -> Result<HtmlPage> {
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(HTML_HOSTING_PATH, id)),
        )
        .await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<HtmlPage>> {
        page.validate()?;
        let call = ApiRequest::get(HTML_HOSTING_PATH).extend_query(page.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all(&self, page_size: u32) -> BoxStream<'_, Result<HtmlPage>> {
        offset_stream(PageRequest::new(0, page_size), move |page| self.list(page))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(HTML_HOSTING_PATH, id)),
        )
        .await
    }

    async fn upload_content(
        &self,
        ticket: HtmlUploadTicket,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<HtmlPage> {
        let HtmlUploadTicket {
            mut page,
            upload_url,
            file_url,
        } = ticket;

        let upload_url = upload_url.ok_or_else(|| SdkError::Unsuccessful {
            message: format!("no upload URL issued for page {}", page.id),
            exception: None,
        })?;

        self.transport
            .upload(ObjectUpload {
                upload_url,
                content_type: content_type.to_string(),
                bytes: content,
            })
            .await?;
        debug!(page_id = %page.id, "Page content uploaded");

        if file_url.is_some() {
            page.file_url = file_url;
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::transport::mocks::MockTransport;
    use crate::port::HttpMethod;
    use serde_json::json;

    fn ticket(upload: bool) -> serde_json::Value {
        let mut ticket = json!({
            "page": {"id": "p1", "name": "Landing", "url": "https://pages.example/p1"},
        });
        if upload {
            ticket["uploadUrl"] = json!("https://bucket.example/p1?sig=abc");
            ticket["fileUrl"] = json!("https://cdn.example/p1/index.html");
        }
        ticket
    }

    #[tokio::test]
    async fn test_create_registers_then_uploads() {
        let transport = Arc::new(MockTransport::new().reply(ticket(true)));
        let service = HtmlHostingService::new(transport.clone());

        let page = service
            .create_from_html("Landing", "<h1>Hello</h1>")
            .await
            .unwrap();

        assert_eq!(page.file_url.as_deref(), Some("https://cdn.example/p1/index.html"));

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body.as_ref().unwrap()["fileName"], "index.html");
        assert_eq!(request.body.as_ref().unwrap()["contentType"], "text/html");

        let uploads = transport.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].upload_url, "https://bucket.example/p1?sig=abc");
        assert_eq!(uploads[0].content_type, "text/html");
        assert_eq!(uploads[0].bytes, b"<h1>Hello</h1>".to_vec());
    }

    #[tokio::test]
    async fn test_upload_failure_is_not_rolled_back() {
        let transport = Arc::new(
            MockTransport::new()
                .reply(ticket(true))
                .fail_uploads(403, "SignatureDoesNotMatch"),
        );
        let service = HtmlHostingService::new(transport.clone());

        let err = service
            .create_from_html("Landing", "<p/>")
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Upload { status: 403, .. }));
        // Only the registration call; no compensating delete
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_metadata_only_update_skips_upload() {
        let transport = Arc::new(MockTransport::new().reply(ticket(false)));
        let service = HtmlHostingService::new(transport.clone());

        let update = UpdateHtmlPage {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        service.update("p1", update, None).await.unwrap();

        assert!(transport.uploads().is_empty());
        assert_eq!(transport.requests()[0].path, "/api/html-hosting/p1");
    }

    #[tokio::test]
    async fn test_content_update_without_file_metadata_is_rejected() {
        let transport = Arc::new(MockTransport::new());
        let service = HtmlHostingService::new(transport.clone());

        let result = service
            .update("p1", UpdateHtmlPage::default(), Some(b"<p/>".to_vec()))
            .await;

        assert!(matches!(result, Err(SdkError::Domain(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_upload_url() {
        let transport = Arc::new(MockTransport::new().reply(ticket(false)));
        let service = HtmlHostingService::new(transport);

        let err = service.create_from_html("Landing", "<p/>").await.unwrap_err();
        assert!(matches!(err, SdkError::Unsuccessful { .. }));
    }
}
