// Domain Layer - Wire models and local preconditions

pub mod envelope;
pub mod error;
pub mod html_hosting;
pub mod pagination;
pub mod publishing;
pub mod qr_code;
pub mod short_link;
pub mod social;
pub mod submission;
pub mod variable;

// Re-exports
pub use envelope::ApiResponse;
pub use error::DomainError;
pub use html_hosting::{CreateHtmlPage, HtmlPage, HtmlUploadTicket, UpdateHtmlPage};
pub use pagination::{CursorPage, CursorRequest, Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use publishing::{MediaFile, PublishOptions, PublishTarget, UploadUrls, VideoSource};
pub use qr_code::{CreateQrCode, ErrorCorrection, QrCode, QrFormat, UpdateQrCode};
pub use short_link::{CreateShortLink, ShortLink, ShortLinkStats, UpdateShortLink};
pub use social::{
    ConnectUrl, CreateWorkspace, Platform, PostFilter, PostStatus, Privacy, PublisherPost,
    PublisherTask, SocialAccount, SourceType, TaskFilter, TaskStatus, UpdateWorkspace, Workspace,
};
pub use submission::FormSubmission;
pub use variable::{Variable, VariableKey, VARIABLE_KEY_PREFIX};
