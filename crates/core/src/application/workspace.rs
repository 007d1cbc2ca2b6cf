// Workspace Service - /api/social-publisher-workspace (offset pagination)

use crate::application::api_call::{execute, fetch, resource_path};
use crate::application::paging::offset_stream;
use crate::domain::{
    ConnectUrl, CreateWorkspace, DomainError, Page, PageRequest, Platform, SocialAccount,
    UpdateWorkspace, Workspace,
};
use crate::error::Result;
use crate::port::{ApiRequest, HttpTransport};
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::info;

pub const WORKSPACE_PATH: &str = "/api/social-publisher-workspace";

pub struct WorkspaceService {
    transport: Arc<dyn HttpTransport>,
}

impl WorkspaceService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: CreateWorkspace) -> Result<Workspace> {
        if request.name.trim().is_empty() {
            return Err(DomainError::Validation("workspace name is empty".to_string()).into());
        }
        let call = ApiRequest::post(WORKSPACE_PATH).json(&request)?;
        let workspace: Workspace = fetch(self.transport.as_ref(), call).await?;
        info!(workspace_id = %workspace.id, "Workspace created");
        Ok(workspace)
    }

    pub async fn get(&self, id: &str) -> Result<Workspace> {
        fetch(
            self.transport.as_ref(),
            ApiRequest::get(resource_path(WORKSPACE_PATH, id)),
        )
        .await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Workspace>> {
        page.validate()?;
        let call = ApiRequest::get(WORKSPACE_PATH).extend_query(page.to_query());
        fetch(self.transport.as_ref(), call).await
    }

    pub fn list_all(&self, page_size: u32) -> BoxStream<'_, Result<Workspace>> {
        offset_stream(PageRequest::new(0, page_size), move |page| self.list(page))
    }

    pub async fn update(&self, id: &str, request: UpdateWorkspace) -> Result<Workspace> {
        let call = ApiRequest::put(resource_path(WORKSPACE_PATH, id)).json(&request)?;
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        execute(
            self.transport.as_ref(),
            ApiRequest::delete(resource_path(WORKSPACE_PATH, id)),
        )
        .await
    }

    /// Accounts connected to the workspace
    pub async fn list_accounts(&self, workspace_id: &str) -> Result<Vec<SocialAccount>> {
        let path = format!("{}/accounts", resource_path(WORKSPACE_PATH, workspace_id));
        fetch(self.transport.as_ref(), ApiRequest::get(path)).await
    }

    /// OAuth link for connecting a new account of `platform`
    pub async fn connect_url(&self, workspace_id: &str, platform: Platform) -> Result<ConnectUrl> {
        let path = format!(
            "{}/accounts/connect-url",
            resource_path(WORKSPACE_PATH, workspace_id)
        );
        let call = ApiRequest::get(path).query("platform", platform);
        fetch(self.transport.as_ref(), call).await
    }

    pub async fn disconnect_account(&self, workspace_id: &str, account_id: &str) -> Result<()> {
        let path = resource_path(
            &format!("{}/accounts", resource_path(WORKSPACE_PATH, workspace_id)),
            account_id,
        );
        execute(self.transport.as_ref(), ApiRequest::delete(path)).await
    }
}
