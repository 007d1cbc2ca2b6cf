//! Pubhub Client Implementation

use crate::config::Settings;
use pubhub_core::application::{
    FormSubmissionService, HtmlHostingService, PublisherPostService, PublisherTaskService,
    QrCodeService, ShortLinkService, VariableService, WorkspaceService,
};
use pubhub_core::port::time_provider::SystemTimeProvider;
use pubhub_core::port::{HttpTransport, TimeProvider};
use pubhub_core::Result;
use pubhub_infra_http::{ClientConfig, ReqwestTransport};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Pubhub API Client
///
/// One transport shared by every resource client.
///
/// # Example
///
/// ```no_run
/// use pubhub_sdk::PubhubClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PubhubClient::new("pk_live_...")?;
/// let link = client
///     .short_links()
///     .create(pubhub_sdk::CreateShortLink::new("https://example.com/menu"))
///     .await?;
/// println!("{:?}", link.short_url);
/// # Ok(())
/// # }
/// ```
pub struct PubhubClient {
    transport: Arc<dyn HttpTransport>,
    qr_codes: QrCodeService,
    short_links: ShortLinkService,
    html_hosting: HtmlHostingService,
    submissions: FormSubmissionService,
    variables: VariableService,
    workspaces: WorkspaceService,
    tasks: PublisherTaskService,
    posts: PublisherPostService,
}

impl PubhubClient {
    /// Client against the production API with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        debug!(?config, "Creating client");
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::from_transport(
            Arc::new(transport),
            Arc::new(SystemTimeProvider),
        ))
    }

    /// Settings from the default config file and `PUBHUB_*` variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(Settings::load()?.client_config()?)
    }

    /// Settings from an explicit config file and `PUBHUB_*` variables
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(Settings::load_from(Some(path.as_ref()))?.client_config()?)
    }

    /// Build on any transport (mocks, proxies, custom clients)
    pub fn from_transport(
        transport: Arc<dyn HttpTransport>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            qr_codes: QrCodeService::new(Arc::clone(&transport)),
            short_links: ShortLinkService::new(Arc::clone(&transport)),
            html_hosting: HtmlHostingService::new(Arc::clone(&transport)),
            submissions: FormSubmissionService::new(Arc::clone(&transport)),
            variables: VariableService::new(Arc::clone(&transport)),
            workspaces: WorkspaceService::new(Arc::clone(&transport)),
            tasks: PublisherTaskService::new(Arc::clone(&transport), Arc::clone(&time_provider)),
            posts: PublisherPostService::new(Arc::clone(&transport), time_provider),
            transport,
        }
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn qr_codes(&self) -> &QrCodeService {
        &self.qr_codes
    }

    pub fn short_links(&self) -> &ShortLinkService {
        &self.short_links
    }

    pub fn html_hosting(&self) -> &HtmlHostingService {
        &self.html_hosting
    }

    pub fn submissions(&self) -> &FormSubmissionService {
        &self.submissions
    }

    pub fn variables(&self) -> &VariableService {
        &self.variables
    }

    pub fn workspaces(&self) -> &WorkspaceService {
        &self.workspaces
    }

    pub fn tasks(&self) -> &PublisherTaskService {
        &self.tasks
    }

    pub fn posts(&self) -> &PublisherPostService {
        &self.posts
    }
}
