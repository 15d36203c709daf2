//! The profile record and the shape checks applied to it.

use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::ids::UserId;
use crate::links::{SocialKind, SocialLink, normalize_handle, normalize_stored_url};

/// A user's professional identity and links.
///
/// The same record travels in three contexts: the signed-in user's own
/// profile, an entry of the public listing and a single public profile. Which
/// fields must be present differs per context, see [`ProfileShape`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub user_id: Option<UserId>,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub company: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub role: Option<String>,
    /// Years of experience.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub experience: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url_link: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub linkedin_id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub github_id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub discord_id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub profile_photo: Option<String>,
    /// Server-assigned, display only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub created_at: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl UserProfile {
    /// Canonical form of the record.
    ///
    /// Blank strings become `None`, the website and photo get a default
    /// `https://` and social fields are reduced to their handles. Never fails:
    /// a value that does not parse is kept as received and simply not
    /// rendered as a link.
    pub fn normalized(self) -> Self {
        Self {
            user_id: self.user_id.filter(|id| !id.is_blank()),
            name: self.name.trim().to_string(),
            company: non_blank(self.company),
            role: non_blank(self.role),
            experience: self.experience,
            url_link: self
                .url_link
                .and_then(|v| normalize_handle(SocialKind::Website, &v)),
            linkedin_id: self
                .linkedin_id
                .and_then(|v| normalize_handle(SocialKind::LinkedIn, &v)),
            github_id: self
                .github_id
                .and_then(|v| normalize_handle(SocialKind::GitHub, &v)),
            discord_id: self
                .discord_id
                .and_then(|v| normalize_handle(SocialKind::Discord, &v)),
            profile_photo: self
                .profile_photo
                .and_then(|v| normalize_stored_url(&v)),
            created_at: non_blank(self.created_at),
        }
    }

    /// Present links in display order. Absent fields produce no entry.
    pub fn social_links(&self) -> Vec<SocialLink> {
        SocialKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.link_value(kind)
                    .map(|value| SocialLink::new(kind, value))
            })
            .collect()
    }

    pub fn link_value(&self, kind: SocialKind) -> Option<&str> {
        match kind {
            SocialKind::Website => self.url_link.as_deref(),
            SocialKind::LinkedIn => self.linkedin_id.as_deref(),
            SocialKind::GitHub => self.github_id.as_deref(),
            SocialKind::Discord => self.discord_id.as_deref(),
        }
    }

    /// `"{role} at {company}"` when both are known.
    pub fn headline(&self) -> Option<String> {
        match (self.role.as_deref(), self.company.as_deref()) {
            (Some(role), Some(company)) => Some(format!("{role} at {company}")),
            (Some(role), None) => Some(role.to_string()),
            (None, Some(company)) => Some(company.to_string()),
            (None, None) => None,
        }
    }

    #[cfg(feature = "chrono")]
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.created_at
            .as_deref()
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }
}

/// The context a profile record was received in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    /// The signed-in user's own profile. A freshly registered record may
    /// carry nothing but a name; the edit form enforces the rest on save.
    Own,
    /// An entry of the public directory: must be keyed by `user_id`.
    Listing,
    /// A single public profile looked up by id.
    Public,
}

impl ProfileShape {
    pub fn validate(self, profile: &UserProfile) -> Result<()> {
        if profile.name.trim().is_empty() {
            return Err(ModelError::missing("name"));
        }
        match self {
            ProfileShape::Listing => {
                if profile.user_id.as_ref().is_none_or(UserId::is_blank) {
                    return Err(ModelError::missing("user_id"));
                }
            }
            ProfileShape::Own | ProfileShape::Public => {}
        }
        Ok(())
    }
}

/// Every entry must be a valid listing record and `user_id`s must be unique.
pub fn validate_listing(profiles: &[UserProfile]) -> Result<()> {
    let mut seen = HashSet::with_capacity(profiles.len());
    for profile in profiles {
        ProfileShape::Listing.validate(profile)?;
        if let Some(id) = &profile.user_id
            && !seen.insert(id)
        {
            return Err(ModelError::DuplicateUserId { id: id.clone() });
        }
    }
    Ok(())
}
