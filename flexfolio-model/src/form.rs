//! Edit form state for the signed-in user's profile.

use crate::error::{ModelError, Result};
use crate::links::{SocialKind, normalize_handle, normalize_web_url};
use crate::profile::UserProfile;

/// A labeled input of the profile edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Company,
    Role,
    Experience,
    ProfilePhoto,
    Website,
    LinkedIn,
    GitHub,
    Discord,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::Name,
        ProfileField::Company,
        ProfileField::Role,
        ProfileField::Experience,
        ProfileField::ProfilePhoto,
        ProfileField::Website,
        ProfileField::LinkedIn,
        ProfileField::GitHub,
        ProfileField::Discord,
    ];

    /// Wire name of the field in the profile record.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Company => "company",
            ProfileField::Role => "role",
            ProfileField::Experience => "experience",
            ProfileField::ProfilePhoto => "profile_photo",
            ProfileField::Website => "url_link",
            ProfileField::LinkedIn => "linkedin_id",
            ProfileField::GitHub => "github_id",
            ProfileField::Discord => "discord_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Full Name",
            ProfileField::Company => "Company",
            ProfileField::Role => "Role",
            ProfileField::Experience => "Experience (years)",
            ProfileField::ProfilePhoto => "Profile Photo URL",
            ProfileField::Website => "Personal Website",
            ProfileField::LinkedIn => "LinkedIn Username",
            ProfileField::GitHub => "GitHub Username",
            ProfileField::Discord => "Discord ID",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            ProfileField::Name
                | ProfileField::Company
                | ProfileField::Role
                | ProfileField::Experience
        )
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Raw, unvalidated input of the edit form.
///
/// Values are kept exactly as typed so a failed save never loses what the
/// user entered; parsing happens in [`ProfileForm::to_profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    name: String,
    company: String,
    role: String,
    experience: String,
    profile_photo: String,
    url_link: String,
    linkedin_id: String,
    github_id: String,
    discord_id: String,
}

impl ProfileForm {
    /// Form pre-filled from a held record.
    pub fn from_profile(profile: &UserProfile) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: profile.name.clone(),
            company: text(&profile.company),
            role: text(&profile.role),
            experience: profile
                .experience
                .map(|years| years.to_string())
                .unwrap_or_default(),
            profile_photo: text(&profile.profile_photo),
            url_link: text(&profile.url_link),
            linkedin_id: text(&profile.linkedin_id),
            github_id: text(&profile.github_id),
            discord_id: text(&profile.discord_id),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Company => &self.company,
            ProfileField::Role => &self.role,
            ProfileField::Experience => &self.experience,
            ProfileField::ProfilePhoto => &self.profile_photo,
            ProfileField::Website => &self.url_link,
            ProfileField::LinkedIn => &self.linkedin_id,
            ProfileField::GitHub => &self.github_id,
            ProfileField::Discord => &self.discord_id,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Company => &mut self.company,
            ProfileField::Role => &mut self.role,
            ProfileField::Experience => &mut self.experience,
            ProfileField::ProfilePhoto => &mut self.profile_photo,
            ProfileField::Website => &mut self.url_link,
            ProfileField::LinkedIn => &mut self.linkedin_id,
            ProfileField::GitHub => &mut self.github_id,
            ProfileField::Discord => &mut self.discord_id,
        };
        *slot = value.into();
    }

    pub fn with(mut self, field: ProfileField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Candidate record for the update call.
    ///
    /// The candidate carries no `user_id` or `created_at`; those are assigned
    /// by the server. Blank optional inputs come out as `None`.
    pub fn to_profile(&self) -> Result<UserProfile> {
        let required = |field: ProfileField| -> Result<String> {
            let value = self.get(field).trim();
            if value.is_empty() {
                Err(ModelError::missing(field.key()))
            } else {
                Ok(value.to_string())
            }
        };

        let name = required(ProfileField::Name)?;
        let company = required(ProfileField::Company)?;
        let role = required(ProfileField::Role)?;
        let experience_raw = required(ProfileField::Experience)?;
        let experience = experience_raw
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidExperience {
                value: experience_raw.clone(),
            })?;

        Ok(UserProfile {
            user_id: None,
            name,
            company: Some(company),
            role: Some(role),
            experience: Some(experience),
            url_link: normalize_web_url(ProfileField::Website.key(), &self.url_link)?,
            linkedin_id: normalize_handle(SocialKind::LinkedIn, &self.linkedin_id),
            github_id: normalize_handle(SocialKind::GitHub, &self.github_id),
            discord_id: normalize_handle(SocialKind::Discord, &self.discord_id),
            profile_photo: normalize_web_url(
                ProfileField::ProfilePhoto.key(),
                &self.profile_photo,
            )?,
            created_at: None,
        })
    }
}
