//! Layered loading: defaults, then the TOML file, then the environment.

pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::constants::{
    DEFAULT_API_TIMEOUT, DEFAULT_CONFIG_FILE, DEFAULT_NOTICE_TTL, ENV_API_BASE_URL,
    ENV_API_TIMEOUT, ENV_NOTICE_TTL, ENV_PREFIX, ENV_SITE_URL,
};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{ApiConfig, ClientConfig, ConfigMetadata, ConfigWarning, UiConfig};
use crate::util::{parse_duration_var, parse_http_url};

use self::error::ConfigLoadError;

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    /// The effective configuration.
    pub config: ClientConfig,
    /// Non-fatal findings for the caller to log.
    pub warnings: Vec<ConfigWarning>,
}

/// Composes the effective [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
    vars: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Loader reading the process environment and `.env`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load this `.env` file instead of searching the working directory.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Read this TOML file; takes precedence over `FLEXFOLIO_CONFIG`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use these variables instead of the process environment. No `.env`
    /// file is read in this mode.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Resolve every source into a [`ConfigLoad`].
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut metadata = ConfigMetadata::default();
        let vars = match &self.vars {
            Some(vars) => vars.clone(),
            None => {
                metadata.env_file_loaded = self.load_env_file()?;
                std::env::vars()
                    .filter(|(key, _)| key.starts_with(ENV_PREFIX))
                    .collect()
            }
        };
        let env = EnvConfig::from_vars(&vars);

        let file_path = self
            .config_path
            .clone()
            .or_else(|| env.config_path.clone())
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            });
        let file = match &file_path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };
        metadata.config_file = file_path;

        compose(env, file, metadata)
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| ()),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(err) if err.not_found() => Ok(false),
            Err(err) => Err(ConfigLoadError::EnvFile(err)),
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ConfigLoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    let parsed = toml::from_str(&contents).map_err(|source| ConfigLoadError::ParseFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("[Config] Read config file {}", path.display());
    Ok(parsed)
}

fn compose(
    env: EnvConfig,
    file: FileConfig,
    metadata: ConfigMetadata,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = Vec::new();

    let raw_base = env
        .api_base_url
        .or(file.api.base_url)
        .ok_or(ConfigLoadError::MissingBaseUrl)?;
    let (base_url, base_warnings) = parse_http_url(ENV_API_BASE_URL, &raw_base)?;
    warnings.extend(base_warnings);

    let timeout = match env.api_timeout.or(file.api.timeout) {
        Some(raw) => parse_duration_var(ENV_API_TIMEOUT, &raw)?,
        None => DEFAULT_API_TIMEOUT,
    };
    let notice_ttl = match env.notice_ttl.or(file.ui.notice_ttl) {
        Some(raw) => parse_duration_var(ENV_NOTICE_TTL, &raw)?,
        None => DEFAULT_NOTICE_TTL,
    };
    let site_url = match env.site_url.or(file.ui.site_url) {
        Some(raw) => {
            let (url, site_warnings) = parse_http_url(ENV_SITE_URL, &raw)?;
            warnings.extend(site_warnings);
            Some(url)
        }
        None => None,
    };

    info!("[Config] Profile API origin: {}", base_url);

    Ok(ConfigLoad {
        config: ClientConfig {
            api: ApiConfig { base_url, timeout },
            ui: UiConfig {
                notice_ttl,
                site_url,
            },
            metadata,
        },
        warnings,
    })
}
