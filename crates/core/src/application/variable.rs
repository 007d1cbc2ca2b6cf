// Variable Service - /api/html-hosting-variable (cursor pagination)
//
// Keys are validated locally; a malformed key never reaches the network.

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::cursor_stream;
use crate::domain::variable::VariableBody;
use crate::domain::{CursorPage, CursorRequest, Variable, VariableKey};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::debug;

pub const VARIABLE_PATH: &str = "/api/html-hosting-variable";

pub struct VariableService {
    transport: Arc<dyn HttpTransport>,
}

impl VariableService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, key: &str, value: &str) -> Result<Variable> {
        let key = VariableKey::parse(key)?;
        debug!(key = %key, "Creating variable");
        let call = ApiRequest::post(VARIABLE_PATH).json(&VariableBody {
            key: Some(&key),
            value,
        })?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn get(&self, key: &str) -> Result<Variable> {
        let key = VariableKey::parse(key)?;
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(VARIABLE_PATH, key.as_str())),
        )
        .await
    }

    pub async fn update(&self, key: &str, value: &str) -> Result<Variable> {
        let key = VariableKey::parse(key)?;
        let call = ApiRequest::put(resource_path(VARIABLE_PATH, key.as_str()))
            .json(&VariableBody { key: None, value })?;
        fetch(self.transport.as_ref(), call).await
    }

    /// Create the variable, or overwrite it when it already exists
    pub async fn set(&self, key: &str, value: &str) -> Result<Variable> {
        match self.update(key, value).await {
            Err(e) if e.is_not_found() => self.create(key, value).await,
            other => other,
        }
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let key = VariableKey::parse(key)?;
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(VARIABLE_PATH, key.as_str())),
        )
        .await
    }

    pub async fn list(&self, cursor: CursorRequest) -> Result<CursorPage<Variable>> {
        cursor.validate()?;
        let call = ApiRequest::get(VARIABLE_PATH).extend_query(cursor.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all(&self, page_size: u32) -> BoxStream<'_, Result<Variable>> {
        cursor_stream(page_size, move |cursor| self.list(cursor))
    }
}
