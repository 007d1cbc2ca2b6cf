// Form Submission Service - /api/html-hosting-submission (cursor pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::cursor_stream;
use crate::domain::{CursorPage, CursorRequest, FormSubmission};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use futures::stream::BoxStream;
use std::sync::Arc;

pub const SUBMISSION_PATH: &str = "/api/html-hosting-submission";

pub struct FormSubmissionService {
    transport: Arc<dyn HttpTransport>,
}

impl FormSubmissionService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Submissions received by one hosted page, newest first
    pub async fn list(
        &self,
        html_hosting_id: &str,
        cursor: CursorRequest,
    ) -> Result<CursorPage<FormSubmission>> {
        cursor.validate()?;
        let call = ApiRequest::get(SUBMISSION_PATH)
            .query("htmlHostingId", html_hosting_id)
            .extend_query(cursor.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all<'a>(
        &'a self,
        html_hosting_id: &'a str,
        page_size: u32,
    ) -> BoxStream<'a, Result<FormSubmission>> {
        cursor_stream(page_size, move |cursor| self.list(html_hosting_id, cursor))
    }

    pub async fn get(&self, id: &str) -> Result<FormSubmission> {
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(SUBMISSION_PATH, id)),
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(SUBMISSION_PATH, id)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::transport::mocks::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_sends_cursor_params() {
        let transport = Arc::new(MockTransport::new().reply(json!({
            "items": [{
                "id": "s1",
                "htmlHostingId": "p1",
                "data": {"email": "a@example.com", "age": 31}
            }],
            "nextCursor": "eyJpZCI6InMxIn0"
        })));
        let service = FormSubmissionService::new(transport.clone());

        let page = service
            .list("p1", CursorRequest::after("c0", 25))
            .await
            .unwrap();

        assert!(page.has_more());
        assert_eq!(page.items[0].field("email"), Some("a@example.com"));
        assert_eq!(page.items[0].field("age"), None);

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("htmlHostingId"), Some("p1"));
        assert_eq!(request.query_value("cursor"), Some("c0"));
        assert_eq!(request.query_value("pageSize"), Some("25"));
        assert_eq!(request.query_value("page"), None);
    }
}
