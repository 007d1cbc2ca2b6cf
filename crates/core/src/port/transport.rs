// HTTP Transport Port
// The one seam between request shaping (core) and the wire (infra-http)

use crate::error::{Result, SdkError};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend call, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn extend_query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Query parameter lookup (first match)
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One PUT of raw bytes to a pre-signed object-storage URL
#[derive(Clone)]
pub struct ObjectUpload {
    pub upload_url: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ObjectUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectUpload")
            .field("upload_url", &self.upload_url)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Transport interface shared by every resource service
///
/// Implementations:
/// - ReqwestTransport (infra-http): HTTPS with API key injection
/// - MockTransport: scripted replies for unit tests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a backend call and return the decoded JSON body
    ///
    /// # Errors
    /// - Status-mapped `SdkError` variants for non-success responses
    /// - `SdkError::Transport` / `SdkError::Timeout` when no response arrived
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value>;

    /// PUT bytes to a pre-signed URL (no API key is sent)
    ///
    /// # Errors
    /// - `SdkError::Upload` when storage answers with a non-success status
    async fn upload(&self, upload: ObjectUpload) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted reply for one `send`
    #[derive(Debug, Clone)]
    pub enum MockReply {
        /// Raw JSON body
        Body(serde_json::Value),
        /// Non-success status with body
        Status(u16, String),
    }

    /// Mock transport: replays scripted replies in order and records calls
    #[derive(Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<MockReply>>,
        requests: Mutex<Vec<ApiRequest>>,
        uploads: Mutex<Vec<ObjectUpload>>,
        upload_failure: Mutex<Option<(u16, String)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful envelope around `result`
        pub fn reply(self, result: serde_json::Value) -> Self {
            self.reply_raw(serde_json::json!({
                "message": "ok",
                "isSuccess": true,
                "result": result,
            }))
        }

        /// Queue a raw body
        pub fn reply_raw(self, body: serde_json::Value) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(MockReply::Body(body));
            self
        }

        /// Queue a non-success status
        pub fn fail(self, status: u16, body: impl Into<String>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(MockReply::Status(status, body.into()));
            self
        }

        /// Make every upload fail with this status
        pub fn fail_uploads(self, status: u16, body: impl Into<String>) -> Self {
            *self.upload_failure.lock().unwrap() = Some((status, body.into()));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn uploads(&self) -> Vec<ObjectUpload> {
            self.uploads.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<serde_json::Value> {
            self.requests.lock().unwrap().push(request.clone());

            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(MockReply::Body(body)) => Ok(body),
                Some(MockReply::Status(status, body)) => Err(SdkError::from_status(status, body)),
                None => Err(SdkError::Transport(format!(
                    "no scripted reply for {} {}",
                    request.method, request.path
                ))),
            }
        }

        async fn upload(&self, upload: ObjectUpload) -> Result<()> {
            self.uploads.lock().unwrap().push(upload);

            match self.upload_failure.lock().unwrap().clone() {
                Some((status, body)) => Err(SdkError::Upload { status, body }),
                None => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/api/qr-code")
            .query("page", 2)
            .query_opt("cursor", None::<String>)
            .query_opt("pageSize", Some(10));

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("pageSize"), Some("10"));
        assert_eq!(request.query_value("cursor"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_upload_debug_hides_bytes() {
        let upload = ObjectUpload {
            upload_url: "https://bucket/obj".to_string(),
            content_type: "video/mp4".to_string(),
            bytes: vec![7u8; 1024],
        };
        let debug = format!("{:?}", upload);
        assert!(debug.contains("len: 1024"));
        assert!(!debug.contains("7, 7"));
    }
}
