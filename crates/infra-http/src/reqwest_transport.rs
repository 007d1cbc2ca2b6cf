// reqwest-backed HttpTransport

use crate::config::ClientConfig;
use async_trait::async_trait;
use pubhub_core::port::id_provider::UuidProvider;
use pubhub_core::port::{ApiRequest, HttpMethod, HttpTransport, IdProvider, ObjectUpload};
use pubhub_core::{Result, SdkError};
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use tracing::{debug, error, warn};

const API_KEY_HEADER: &str = "X-API-Key";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTPS transport with API key injection
///
/// Retries only when the connection could not be established; a timeout or
/// an error status is returned on the first attempt.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
    id_provider: Arc<dyn IdProvider>,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SdkError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            config,
            id_provider: Arc::new(UuidProvider),
        })
    }

    /// Replace the correlation ID source
    pub fn with_id_provider(mut self, id_provider: Arc<dyn IdProvider>) -> Self {
        self.id_provider = id_provider;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build(&self, request: &ApiRequest, url: &str, request_id: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method(request.method), url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(REQUEST_ID_HEADER, request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn handle_response(
        &self,
        response: Response,
        request_id: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();
        let retry_after = retry_after(response.headers());
        let text = response.text().await.map_err(transport_error)?;

        if self.config.debug {
            debug!(request_id, status = status.as_u16(), body = %text, "Response body");
        }

        if !status.is_success() {
            error!(request_id, status = status.as_u16(), "Request failed");
            return Err(SdkError::from_status(status.as_u16(), text).with_retry_after(retry_after));
        }

        debug!(request_id, status = status.as_u16(), "Request successful");
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.config.base(), request.path);
        let request_id = self.id_provider.generate_id();
        debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            "Sending request"
        );
        if self.config.debug {
            if let Some(body) = &request.body {
                debug!(request_id = %request_id, body = %body, "Request body");
            }
        }

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.build(&request, &url, &request_id).send().await {
                Ok(response) => return self.handle_response(response, &request_id).await,
                Err(e) if e.is_connect() && attempt <= self.config.retry_count => {
                    warn!(
                        request_id = %request_id,
                        path = %request.path,
                        attempt,
                        error = %e,
                        "Connection failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    error!(request_id = %request_id, path = %request.path, attempt, "Request failed: {}", e);
                    return Err(transport_error(e));
                }
            }
        }
    }

    async fn upload(&self, upload: ObjectUpload) -> Result<()> {
        debug!(
            content_type = %upload.content_type,
            bytes = upload.bytes.len(),
            "Uploading object"
        );

        // Pre-signed URLs carry their own credentials
        let response = self
            .client
            .put(&upload.upload_url)
            .header(CONTENT_TYPE, upload.content_type)
            .body(upload.bytes)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), "Upload failed");
        Err(SdkError::Upload {
            status: status.as_u16(),
            body,
        })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn transport_error(e: reqwest::Error) -> SdkError {
    if e.is_timeout() {
        SdkError::Timeout
    } else {
        SdkError::Transport(e.to_string())
    }
}

// Only the delta-seconds form is honoured
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
