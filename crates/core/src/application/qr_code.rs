// QR Code Service - /api/qr-code (offset pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::offset_stream;
use crate::domain::{CreateQrCode, Page, PageRequest, QrCode, UpdateQrCode};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::debug;

pub const QR_CODE_PATH: &str = "/api/qr-code";

pub struct QrCodeService {
    transport: Arc<dyn HttpTransport>,
}

impl QrCodeService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: CreateQrCode) -> Result<QrCode> {
        request.validate()?;
        debug!(name = %request.name, "Creating QR code");
        let call = ApiRequest::post(QR_CODE_PATH).json(&request)?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn get(&self, id: &str) -> Result<QrCode> {
        let call = ApiRequest::get(resource_path(QR_CODE_PATH, id));
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<QrCode>> {
        page.validate()?;
        let call = ApiRequest::get(QR_CODE_PATH).extend_query(page.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    /// Every QR code, page by page
    pub fn list_all(&self, page_size: u32) -> BoxStream<'_, Result<QrCode>> {
        offset_stream(PageRequest::new(0, page_size), move |page| self.list(page))
    }

    pub async fn update(&self, id: &str, request: UpdateQrCode) -> Result<QrCode> {
        request.validate()?;
        let call = ApiRequest::put(resource_path(QR_CODE_PATH, id)).json(&request)?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        debug!(id = %id, "Deleting QR code");
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(QR_CODE_PATH, id)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::port::transport::mocks::MockTransport;
    use crate::port::HttpMethod;
    use serde_json::json;

    fn qr_json(id: &str) -> serde_json::Value {
        json!({"id": id, "name": "menu", "content": "https://example.com/menu"})
    }

    #[tokio::test]
    async fn test_create_posts_body() {
        let transport = Arc::new(MockTransport::new().reply(qr_json("q1")));
        let service = QrCodeService::new(transport.clone());

        let qr = service
            .create(CreateQrCode::new("menu", "https://example.com/menu").size(300))
            .await
            .unwrap();

        assert_eq!(qr.id, "q1");
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path, "/api/qr-code");
        assert_eq!(requests[0].body.as_ref().unwrap()["size"], 300);
    }

    #[tokio::test]
    async fn test_invalid_create_never_hits_network() {
        let transport = Arc::new(MockTransport::new());
        let service = QrCodeService::new(transport.clone());

        let result = service.create(CreateQrCode::new("menu", "")).await;
        assert!(matches!(result, Err(SdkError::Domain(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_sends_offset_params() {
        let transport = Arc::new(MockTransport::new().reply(json!({
            "items": [qr_json("q1")],
            "totalCount": 21,
            "page": 1,
            "pageSize": 10
        })));
        let service = QrCodeService::new(transport.clone());

        let page = service.list(PageRequest::new(1, 10)).await.unwrap();
        assert!(page.has_more());

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("page"), Some("1"));
        assert_eq!(request.query_value("pageSize"), Some("10"));
    }

    #[tokio::test]
    async fn test_get_maps_not_found() {
        let transport = Arc::new(MockTransport::new().fail(404, "no such code"));
        let service = QrCodeService::new(transport);

        let err = service.get("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.body(), Some("no such code"));
    }
}
