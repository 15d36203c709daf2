//! Environment keys and defaults.

use std::time::Duration;

/// Profile API origin. Required unless the config file sets `api.base_url`.
pub const ENV_API_BASE_URL: &str = "FLEXFOLIO_API_BASE_URL";
/// Per-request timeout, humantime syntax.
pub const ENV_API_TIMEOUT: &str = "FLEXFOLIO_API_TIMEOUT";
/// How long notices stay visible, humantime syntax.
pub const ENV_NOTICE_TTL: &str = "FLEXFOLIO_NOTICE_TTL";
/// Public site origin used for shareable profile links.
pub const ENV_SITE_URL: &str = "FLEXFOLIO_SITE_URL";
/// Path of the TOML config file.
pub const ENV_CONFIG_PATH: &str = "FLEXFOLIO_CONFIG";

/// Prefix of every variable the loader reads.
pub const ENV_PREFIX: &str = "FLEXFOLIO_";

/// Read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flexfolio.toml";
/// Used when no timeout is configured.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);
/// Used when no notice lifetime is configured.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(4);
