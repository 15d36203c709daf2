//! Raw, unvalidated inputs of the loader.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ENV_API_BASE_URL, ENV_API_TIMEOUT, ENV_CONFIG_PATH, ENV_NOTICE_TTL, ENV_SITE_URL,
};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    /// `[api]` table.
    #[serde(default)]
    pub api: FileApiConfig,
    /// `[ui]` table.
    #[serde(default)]
    pub ui: FileUiConfig,
}

/// `[api]` table of the config file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    /// Profile API origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Humantime duration, e.g. `"15s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// `[ui]` table of the config file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileUiConfig {
    /// Humantime duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_ttl: Option<String>,
    /// Public site origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// Raw values read from the environment. Blank values count as unset.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    /// `FLEXFOLIO_API_BASE_URL`
    pub api_base_url: Option<String>,
    /// `FLEXFOLIO_API_TIMEOUT`
    pub api_timeout: Option<String>,
    /// `FLEXFOLIO_NOTICE_TTL`
    pub notice_ttl: Option<String>,
    /// `FLEXFOLIO_SITE_URL`
    pub site_url: Option<String>,
    /// `FLEXFOLIO_CONFIG`
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    /// Pick the known keys out of a variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            api_base_url: get(ENV_API_BASE_URL),
            api_timeout: get(ENV_API_TIMEOUT),
            notice_ttl: get(ENV_NOTICE_TTL),
            site_url: get(ENV_SITE_URL),
            config_path: get(ENV_CONFIG_PATH).map(PathBuf::from),
        }
    }
}
