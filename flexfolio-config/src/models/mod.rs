//! Validated configuration handed to the client.

pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{DEFAULT_API_TIMEOUT, DEFAULT_NOTICE_TTL};

/// Effective client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Profile API settings.
    pub api: ApiConfig,
    /// Presentation settings.
    pub ui: UiConfig,
    /// Sources that contributed.
    pub metadata: ConfigMetadata,
}

impl ClientConfig {
    /// Defaults for everything except the API origin.
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            api: ApiConfig {
                base_url,
                timeout: DEFAULT_API_TIMEOUT,
            },
            ui: UiConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }
}

/// Profile API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin the API paths are joined onto. The path ends in `/`.
    pub base_url: Url,
    /// Applied to every outbound request.
    pub timeout: Duration,
}

/// Presentation settings.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// How long success/error notices stay visible.
    pub notice_ttl: Duration,
    /// Public origin of the site, used to build shareable profile links.
    pub site_url: Option<Url>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_ttl: DEFAULT_NOTICE_TTL,
            site_url: None,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    /// A `.env` file was found and applied.
    pub env_file_loaded: bool,
    /// The TOML file that was read, if any.
    pub config_file: Option<PathBuf>,
}

/// Non-fatal finding surfaced to the caller for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// What was found.
    pub message: String,
    /// How to silence it.
    pub hint: Option<String>,
}

impl ConfigWarning {
    /// Warning without a hint.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
