// Response envelope shared by every endpoint

use crate::error::{Result, SdkError};
use serde::Deserialize;

/// `{ message, isSuccess, result, exception }` wrapper returned by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub is_success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub exception: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, failing when the backend flagged the call or
    /// returned no result
    pub fn into_result(self) -> Result<T> {
        self.into_optional()?.ok_or(SdkError::MissingResult)
    }

    /// Unwrap an optional payload (used by calls that return nothing)
    pub fn into_optional(self) -> Result<Option<T>> {
        if !self.is_success {
            return Err(SdkError::Unsuccessful {
                message: self
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
                exception: self.exception,
            });
        }
        Ok(self.result)
    }
}
