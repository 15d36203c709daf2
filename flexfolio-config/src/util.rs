//! Parsers shared by the file and environment sources.

use std::time::Duration;

use url::Url;

use crate::loader::error::ConfigLoadError;
use crate::models::ConfigWarning;

/// Parse a humantime duration, rejecting zero.
pub fn parse_duration_var(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    let duration = humantime::parse_duration(raw.trim())
        .map_err(|source| ConfigLoadError::InvalidDuration { key, source })?;
    if duration.is_zero() {
        return Err(ConfigLoadError::ZeroDuration { key });
    }
    Ok(duration)
}

/// Parse an http(s) origin.
///
/// Many users will provide `localhost:3000`, which would otherwise parse with
/// `localhost` as the scheme. A missing scheme defaults to `http://`. The
/// path always ends in `/` so a sub-path like `/flexfolio` is kept when
/// relative routes are joined onto it.
pub fn parse_http_url(
    key: &'static str,
    raw: &str,
) -> Result<(Url, Vec<ConfigWarning>), ConfigLoadError> {
    let mut warnings = Vec::new();
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        warnings.push(
            ConfigWarning::new(format!("{key} has no scheme, assuming http://{trimmed}"))
                .with_hint("set an explicit https:// origin for deployed APIs"),
        );
        format!("http://{trimmed}")
    };

    let mut url = Url::parse(&candidate)
        .map_err(|source| ConfigLoadError::InvalidUrl { key, source })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigLoadError::UnsupportedScheme {
            key,
            value: raw.trim().to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let directory = format!("{}/", url.path());
        url.set_path(&directory);
    }

    if url.scheme() == "http" && !is_loopback(&url) {
        warnings.push(ConfigWarning::new(format!(
            "{key} uses plain http for a non-local host; bearer tokens will travel unencrypted"
        )));
    }

    Ok((url, warnings))
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain == "localhost",
        Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
        Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
        None => false,
    }
}
