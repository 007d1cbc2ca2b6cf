//! Layered settings: defaults < TOML file < `PUBHUB_*` environment variables

use config::{Config, Environment, File};
use pubhub_core::{Result, SdkError};
use pubhub_infra_http::{ClientConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const ENV_PREFIX: &str = "PUBHUB";

/// Settings as read from file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub debug: bool,
    pub timeout_secs: u64,
    pub retry_count: u32,
    pub retry_delay_ms: u64,
}

impl Settings {
    /// Load from the default config file (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from an explicit file (if present) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn build(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)
            .and_then(|b| b.set_default("debug", false))
            .and_then(|b| b.set_default("timeout_secs", 30_i64))
            .and_then(|b| b.set_default("retry_count", 3_i64))
            .and_then(|b| b.set_default("retry_delay_ms", 1000_i64))
            .map_err(config_error)?;

        if let Some(path) = path {
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)
    }

    /// Transport configuration; fails when no API key was provided
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SdkError::config_error(format!(
                    "API key is missing: set {ENV_PREFIX}_API_KEY or api_key in the config file"
                ))
            })?;

        let config = ClientConfig::new(api_key)
            .with_base_url(self.base_url.clone())
            .with_debug(self.debug)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry_count(self.retry_count)
            .with_retry_delay(Duration::from_millis(self.retry_delay_ms));
        config.validate()?;
        Ok(config)
    }
}

/// `$XDG_CONFIG_HOME/pubhub/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "pubhub", "pubhub")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn config_error(e: config::ConfigError) -> SdkError {
    SdkError::config_error(e.to_string())
}
