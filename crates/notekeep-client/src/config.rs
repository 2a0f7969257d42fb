//! Client configuration.
//!
//! Loaded from environment variables (`NOTEKEEP_*`), falling back to the
//! defaults in [`notekeep_core::defaults`].
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | NOTEKEEP_BASE_URL | http://localhost:8080/api | Server base URL |
//! | NOTEKEEP_TIMEOUT | 30 | Request timeout (seconds) |
//! | NOTEKEEP_USER_AGENT | notekeep/<version> | User-Agent header |

use notekeep_core::defaults;
use thiserror::Error;
use tracing::debug;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for notekeep_core::Error {
    fn from(e: ConfigError) -> Self {
        notekeep_core::Error::Config(e.to_string())
    }
}

/// Configuration for the HTTP note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; route paths such as `/notes` are appended to it.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, other fields defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let config = Self {
            base_url: std::env::var("NOTEKEEP_BASE_URL")
                .unwrap_or_else(|_| defaults::BASE_URL.to_string()),
            timeout_seconds: std::env::var("NOTEKEEP_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::TIMEOUT_SECS),
            user_agent: std::env::var("NOTEKEEP_USER_AGENT")
                .unwrap_or_else(|_| defaults::USER_AGENT.to_string()),
        };
        debug!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "Loaded client config from environment"
        );
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL for a route path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
