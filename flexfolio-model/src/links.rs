//! Canonical representation of the outbound links on a profile.
//!
//! Websites and photos are stored as absolute URLs. LinkedIn, GitHub and
//! Discord are stored as bare handles; a full profile URL on the expected
//! network or an `@handle` is reduced to the handle here. A URL pointing
//! anywhere else is kept as received and only linked when it is an absolute
//! http(s) URL.

use std::fmt;

use url::Url;

use crate::error::{ModelError, Result};

/// The kinds of outbound link a profile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialKind {
    Website,
    LinkedIn,
    GitHub,
    Discord,
}

impl SocialKind {
    pub const ALL: [SocialKind; 4] = [
        SocialKind::Website,
        SocialKind::LinkedIn,
        SocialKind::GitHub,
        SocialKind::Discord,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SocialKind::Website => "Website",
            SocialKind::LinkedIn => "LinkedIn",
            SocialKind::GitHub => "GitHub",
            SocialKind::Discord => "Discord",
        }
    }

    /// Host + path prefixes under which a handle can appear when a user pastes
    /// a full profile URL instead of the handle.
    fn profile_prefixes(self) -> &'static [&'static str] {
        match self {
            SocialKind::Website => &[],
            SocialKind::LinkedIn => &["linkedin.com/in/", "www.linkedin.com/in/"],
            SocialKind::GitHub => &["github.com/", "www.github.com/"],
            SocialKind::Discord => &[
                "discord.com/users/",
                "discordapp.com/users/",
                "www.discord.com/users/",
            ],
        }
    }

    fn profile_base(self) -> Option<&'static str> {
        match self {
            SocialKind::Website => None,
            SocialKind::LinkedIn => Some("https://linkedin.com/in/"),
            SocialKind::GitHub => Some("https://github.com/"),
            SocialKind::Discord => Some("https://discord.com/users/"),
        }
    }
}

impl fmt::Display for SocialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A present link on a profile, in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub kind: SocialKind,
    /// Handle for the social networks, absolute URL for websites.
    pub value: String,
}

impl SocialLink {
    pub fn new(kind: SocialKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Outbound URL for this link. `None` when a stored URL does not parse
    /// as an absolute http(s) URL.
    pub fn href(&self) -> Option<String> {
        match self.kind.profile_base() {
            Some(base) if !self.value.contains('/') => {
                let mut url = Url::parse(base).ok()?;
                url.path_segments_mut()
                    .ok()?
                    .pop_if_empty()
                    .push(&self.value);
                Some(url.into())
            }
            _ => Url::parse(&self.value)
                .ok()
                .filter(|url| {
                    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
                })
                .map(|_| self.value.clone()),
        }
    }

    /// Text shown for the link.
    pub fn text(&self) -> &str {
        &self.value
    }
}

fn strip_scheme(raw: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if let Some(head) = raw.get(..scheme.len())
            && head.eq_ignore_ascii_case(scheme)
        {
            return &raw[scheme.len()..];
        }
    }
    raw
}

/// Reduce user input or a stored value for a social network to its handle.
///
/// Returns `None` for blank input. Websites get a default scheme, like
/// [`normalize_stored_url`]. Values that point at another site are returned
/// trimmed but otherwise untouched.
pub fn normalize_handle(kind: SocialKind, raw: &str) -> Option<String> {
    if kind == SocialKind::Website {
        return normalize_stored_url(raw);
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut rest = strip_scheme(trimmed);
    let lower = rest.to_ascii_lowercase();
    match kind
        .profile_prefixes()
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
    {
        Some(prefix) => rest = &rest[prefix.len()..],
        None if trimmed.contains("://") || rest.contains('/') => {
            return Some(trimmed.to_string());
        }
        None => {}
    }

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let handle = rest
        .trim_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .trim_start_matches('@')
        .trim();

    (!handle.is_empty()).then(|| handle.to_string())
}

/// Lenient form of [`normalize_web_url`] for values received from the server:
/// blank is `None`, a bare host gets `https://`, nothing is rejected.
pub fn normalize_stored_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| with_default_scheme(trimmed))
}

fn with_default_scheme(trimmed: &str) -> String {
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Validate a user-entered web address.
///
/// Blank input is `Ok(None)`. A bare host gets `https://` prepended; the
/// result must parse as an http(s) URL with a host. The stored value keeps
/// the user's spelling rather than the reserialized URL.
pub fn normalize_web_url(field: &'static str, raw: &str) -> Result<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let candidate = with_default_scheme(trimmed);
    let invalid = || ModelError::InvalidUrl {
        field,
        value: trimmed.to_string(),
    };
    let parsed = Url::parse(&candidate).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(Some(candidate))
}
