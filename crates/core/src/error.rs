// Central Error Type for the SDK

use thiserror::Error;

/// SDK-level error type
///
/// HTTP failures keep the original status code and raw response body so
/// callers can diagnose what the backend rejected.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Authentication failed ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("Not found ({status}): {body}")]
    NotFound { status: u16, body: String },

    #[error("Validation failed ({status}): {message}")]
    Validation {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Rate limit exceeded ({status}): {body}")]
    RateLimited {
        status: u16,
        body: String,
        retry_after: Option<u64>,
    },

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Upload to storage failed ({status}): {body}")]
    Upload { status: u16, body: String },

    #[error("Request was not successful: {message}")]
    Unsuccessful {
        message: String,
        exception: Option<serde_json::Value>,
    },

    #[error("Response envelope carried no result")]
    MissingResult,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using SdkError
pub type Result<T> = std::result::Result<T, SdkError>;

impl SdkError {
    /// Translate a non-success HTTP status into the matching error
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => SdkError::Authentication { status, body },
            404 => SdkError::NotFound { status, body },
            400 | 422 => SdkError::Validation {
                status,
                message: server_message(&body).unwrap_or_else(|| body.clone()),
                body,
            },
            429 => SdkError::RateLimited {
                status,
                body,
                retry_after: None,
            },
            _ => SdkError::Api { status, body },
        }
    }

    /// Attach a `Retry-After` hint (seconds) to a rate-limit error
    pub fn with_retry_after(self, seconds: Option<u64>) -> Self {
        match self {
            SdkError::RateLimited { status, body, .. } => SdkError::RateLimited {
                status,
                body,
                retry_after: seconds,
            },
            other => other,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        SdkError::Config(message.into())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Authentication { status, .. }
            | SdkError::NotFound { status, .. }
            | SdkError::Validation { status, .. }
            | SdkError::RateLimited { status, .. }
            | SdkError::Api { status, .. }
            | SdkError::Upload { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body carried by the error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            SdkError::Authentication { body, .. }
            | SdkError::NotFound { body, .. }
            | SdkError::Validation { body, .. }
            | SdkError::RateLimited { body, .. }
            | SdkError::Api { body, .. }
            | SdkError::Upload { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound { .. })
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, SdkError::Authentication { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SdkError::RateLimited { .. })
    }

    /// True for errors raised before any request left the process
    pub fn is_local(&self) -> bool {
        matches!(self, SdkError::Domain(_) | SdkError::Config(_))
    }
}

// Validation bodies are usually the standard envelope; prefer its message.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
