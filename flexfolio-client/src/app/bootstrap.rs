use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use flexfolio_config::{ClientConfig, ConfigLoader};
use log::{info, warn};

use crate::infra::api_client::ApiClient;

/// Resolved configuration plus the shared API client.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<ApiClient>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = ApiClient::from_config(&config.api)
            .context("failed to build HTTP client")?;
        Ok(Self {
            config,
            api: Arc::new(api),
        })
    }

    /// Load configuration from the environment, `.env` and the config file.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = config_path {
            loader = loader.with_config_path(path);
        }
        let load = loader.load().context("failed to load configuration")?;

        for warning in &load.warnings {
            match &warning.hint {
                Some(hint) => warn!("[Config] {} ({})", warning.message, hint),
                None => warn!("[Config] {}", warning.message),
            }
        }
        if let Some(path) = &load.config.metadata.config_file {
            info!("[Config] Using config file {}", path.display());
        }

        Self::new(load.config)
    }
}
