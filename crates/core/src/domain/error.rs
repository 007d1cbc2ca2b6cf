// Domain Error Types
// Local precondition failures, raised before any network call

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid variable key '{key}': keys must start with '{prefix}' followed by letters, digits or '_'")]
    InvalidVariableKey { key: String, prefix: &'static str },

    #[error("Unsupported video source: {0}")]
    UnsupportedVideoSource(String),

    #[error("Invalid page size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: u32, max: u32 },

    #[error("Scheduled time {0} is in the past")]
    ScheduleInPast(String),

    #[error("Invalid content type '{content_type}', expected {expected}")]
    InvalidContentType {
        content_type: String,
        expected: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
