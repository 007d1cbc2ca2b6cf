// Envelope decoding shared by every resource service

use crate::domain::ApiResponse;
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use serde::de::DeserializeOwned;

/// Send a request and unwrap the `result` of its envelope
pub(crate) async fn fetch<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    request: ApiRequest,
) -> Result<T> {
    let body = transport.send(request).await?;
    let envelope: ApiResponse<T> = serde_json::from_value(body)?;
    envelope.into_result()
}

/// Send a request whose envelope carries no payload (deletes, cancels)
pub(crate) async fn execute(transport: &dyn HttpTransport, request: ApiRequest) -> Result<()> {
    let body = transport.send(request).await?;
    if body.is_null() {
        return Ok(());
    }
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(body)?;
    envelope.into_optional().map(|_| ())
}

/// `{base}/{id}` with the id path-escaped
pub(crate) fn resource_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, urlencoding::encode(id))
}
