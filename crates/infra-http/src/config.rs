// Transport configuration

use pubhub_core::{Result, SdkError};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.pubhub.io";

/// HTTP client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every API path is joined to
    pub base_url: String,

    /// Sent as `X-API-Key` on API calls (never on uploads)
    pub api_key: String,

    /// Log request and response bodies at DEBUG
    pub debug: bool,

    /// Per-request timeout
    pub timeout: Duration,

    /// Extra attempts after a connection-level failure
    pub retry_count: u32,

    /// Fixed pause between attempts
    pub retry_delay: Duration,

    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            debug: false,
            timeout: Duration::from_secs(30),
            retry_count: 3,
            retry_delay: Duration::from_secs(1),
            user_agent: format!("pubhub-sdk/{}", pubhub_core::VERSION),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Reject configurations that could never produce a successful call
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::config_error("API key is required"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SdkError::config_error(format!(
                "base URL must be http(s), got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(SdkError::config_error("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert!(!config.debug);
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let err = tokio_test::assert_err!(ClientConfig::new("  ").validate());
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let config = ClientConfig::new("key").with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_trims_trailing_slash() {
        let config = ClientConfig::new("key").with_base_url("http://localhost:8080/");
        assert_eq!(config.base(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", ClientConfig::new("secret-key"));
        assert!(!debug.contains("secret-key"));
    }
}
