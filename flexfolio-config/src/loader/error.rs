//! Errors raised while composing the configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// No API origin in the environment or the config file.
    #[error(
        "FLEXFOLIO_API_BASE_URL is not set and the config file has no api.base_url"
    )]
    MissingBaseUrl,

    /// A URL setting did not parse.
    #[error("invalid URL in {key}")]
    InvalidUrl {
        /// Variable or file key holding the value.
        key: &'static str,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// A URL setting parsed but is not an http(s) origin with a host.
    #[error("{key} must be an http or https origin, got '{value}'")]
    UnsupportedScheme {
        /// Variable or file key holding the value.
        key: &'static str,
        /// The value as configured.
        value: String,
    },

    /// A duration setting is not in humantime syntax.
    #[error("invalid duration in {key}")]
    InvalidDuration {
        /// Variable or file key holding the value.
        key: &'static str,
        /// Parser error.
        #[source]
        source: humantime::DurationError,
    },

    /// A duration setting is zero.
    #[error("{key} must be greater than zero")]
    ZeroDuration {
        /// Variable or file key holding the value.
        key: &'static str,
    },

    /// The config file could not be read.
    #[error("failed to read config file {path}")]
    ReadFile {
        /// File that was requested.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config file {path}")]
    ParseFile {
        /// File that was read.
        path: PathBuf,
        /// TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("failed to load env file")]
    EnvFile(#[source] dotenvy::Error),
}
