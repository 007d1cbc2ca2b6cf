// Application Layer - Resource services over the transport port

mod api_call;
pub mod html_hosting;
pub mod paging;
pub mod post;
mod publishing;
pub mod qr_code;
pub mod short_link;
pub mod submission;
pub mod task;
pub mod variable;
pub mod workspace;

// Re-exports
pub use html_hosting::{HtmlHostingService, HTML_HOSTING_PATH};
pub use paging::{cursor_stream, offset_stream};
pub use post::{PublisherPostService, POST_PATH};
pub use qr_code::{QrCodeService, QR_CODE_PATH};
pub use short_link::{ShortLinkService, SHORT_LINK_PATH};
pub use submission::{FormSubmissionService, SUBMISSION_PATH};
pub use task::{PublisherTaskService, TASK_PATH};
pub use variable::{VariableService, VARIABLE_PATH};
pub use workspace::{WorkspaceService, WORKSPACE_PATH};
