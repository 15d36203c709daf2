use flexfolio_model::{SocialKind, SocialLink, UserId, UserProfile};
use url::Url;

use super::experience_text;

const ROLE_FALLBACK: &str = "Developer";
const COMPANY_FALLBACK: &str = "Company";

/// One featured portfolio on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCard {
    pub key: UserId,
    pub name: String,
    pub photo: Option<String>,
    /// `"{role} at {company}"`, with placeholders for missing parts.
    pub headline: String,
    pub experience: Option<String>,
    /// The user's website when present, else their public profile page.
    pub portfolio_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryViewModel {
    pub cards: Vec<DirectoryCard>,
}

/// Route of a public profile, absolute when the site origin is known.
///
/// Segments are appended to the origin's path, so a site served under a
/// prefix keeps it.
pub fn profile_route(id: &UserId, site_url: Option<&Url>) -> String {
    site_url
        .and_then(|base| {
            let mut url = base.clone();
            url.path_segments_mut()
                .ok()?
                .pop_if_empty()
                .extend(["user", id.as_str()]);
            Some(String::from(url))
        })
        .unwrap_or_else(|| format!("/user/{}", urlencoding::encode(id.as_str())))
}

impl DirectoryCard {
    fn from_profile(profile: &UserProfile, site_url: Option<&Url>) -> Option<Self> {
        let key = profile.user_id.clone()?;
        let headline = format!(
            "{} at {}",
            profile.role.as_deref().unwrap_or(ROLE_FALLBACK),
            profile.company.as_deref().unwrap_or(COMPANY_FALLBACK)
        );
        let portfolio_href = profile
            .link_value(SocialKind::Website)
            .and_then(|site| SocialLink::new(SocialKind::Website, site).href())
            .unwrap_or_else(|| profile_route(&key, site_url));

        Some(Self {
            name: profile.name.clone(),
            photo: profile.profile_photo.clone(),
            headline,
            experience: profile
                .experience
                .map(|years| format!("{} experience", experience_text(years))),
            portfolio_href,
            key,
        })
    }
}

impl DirectoryViewModel {
    /// Cards in listing order. Entries without a `user_id` cannot be keyed
    /// and are skipped; decoded listings never contain them.
    pub fn new(profiles: &[UserProfile], site_url: Option<&Url>) -> Self {
        Self {
            cards: profiles
                .iter()
                .filter_map(|p| DirectoryCard::from_profile(p, site_url))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
