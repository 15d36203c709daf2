use flexfolio_model::{ProfileField, ProfileForm, UserProfile};

use super::{LinkView, experience_text};
use crate::domains::profile::{Notice, NoticeKind, ProfilePageState, ProfileSnapshot};

const UNTITLED: &str = "Welcome";

/// Read-only rendering of a profile, shared by the own-profile page and the
/// public user page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileViewModel {
    pub title: String,
    pub photo: Option<String>,
    pub headline: Option<String>,
    /// "Professional Information" rows, name first; absent values are omitted.
    pub details: Vec<(&'static str, String)>,
    pub links: Vec<LinkView>,
    pub member_since: Option<String>,
}

impl ProfileViewModel {
    pub fn new(profile: &UserProfile) -> Self {
        let title = if profile.name.is_empty() {
            UNTITLED.to_string()
        } else {
            profile.name.clone()
        };

        let mut details = Vec::new();
        if !profile.name.is_empty() {
            details.push(("Name", profile.name.clone()));
        }
        if let Some(company) = &profile.company {
            details.push(("Company", company.clone()));
        }
        if let Some(role) = &profile.role {
            details.push(("Role", role.clone()));
        }
        if let Some(years) = profile.experience {
            details.push(("Experience", experience_text(years)));
        }

        Self {
            title,
            photo: profile.profile_photo.clone(),
            headline: profile.headline(),
            details,
            links: profile
                .social_links()
                .iter()
                .filter_map(LinkView::from_link)
                .collect(),
            member_since: profile
                .created_at_utc()
                .map(|created| created.format("%B %Y").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub field: ProfileField,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFormViewModel {
    pub fields: Vec<FormFieldView>,
    pub saving: bool,
    pub submit_label: &'static str,
    pub cancel_enabled: bool,
}

impl ProfileFormViewModel {
    pub fn new(form: &ProfileForm, saving: bool) -> Self {
        let fields = ProfileField::ALL
            .into_iter()
            .map(|field| FormFieldView {
                field,
                label: if field.is_required() {
                    format!("{} *", field.label())
                } else {
                    field.label().to_string()
                },
                value: form.get(field).to_string(),
            })
            .collect();

        Self {
            fields,
            saving,
            submit_label: if saving { "Saving..." } else { "Save Changes" },
            cancel_enabled: !saving,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub is_error: bool,
    pub message: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            is_error: notice.kind == NoticeKind::Error,
            message: notice.message.clone(),
        }
    }
}

/// Everything the profile page renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePageViewModel {
    Loading,
    SignInRequired,
    Viewing {
        profile: ProfileViewModel,
        notice: Option<NoticeView>,
    },
    Editing {
        profile: ProfileViewModel,
        form: ProfileFormViewModel,
        notice: Option<NoticeView>,
    },
    Error {
        message: String,
    },
}

impl ProfilePageViewModel {
    pub fn new(snapshot: &ProfileSnapshot) -> Self {
        let notice = snapshot.notice.as_ref().map(NoticeView::from);
        match &snapshot.state {
            ProfilePageState::Loading => ProfilePageViewModel::Loading,
            ProfilePageState::Unauthenticated => ProfilePageViewModel::SignInRequired,
            ProfilePageState::Viewing { profile } => ProfilePageViewModel::Viewing {
                profile: ProfileViewModel::new(profile),
                notice,
            },
            ProfilePageState::Editing {
                profile,
                form,
                pending_save,
            } => ProfilePageViewModel::Editing {
                profile: ProfileViewModel::new(profile),
                form: ProfileFormViewModel::new(form, pending_save.is_some()),
                notice,
            },
            ProfilePageState::Error { message } => ProfilePageViewModel::Error {
                message: message.clone(),
            },
        }
    }
}
