//! View models for transforming page state for rendering

pub mod directory_view_model;
pub mod profile_view_model;

pub use directory_view_model::{DirectoryCard, DirectoryViewModel};
pub use profile_view_model::{
    FormFieldView, NoticeView, ProfileFormViewModel, ProfilePageViewModel,
    ProfileViewModel,
};

use flexfolio_model::SocialLink;

/// A rendered outbound link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub text: String,
    pub href: String,
}

impl LinkView {
    /// `None` when the stored value cannot be turned into a URL.
    pub fn from_link(link: &SocialLink) -> Option<Self> {
        Some(Self {
            label: link.kind.label(),
            text: link.text().to_string(),
            href: link.href()?,
        })
    }
}

pub(crate) fn experience_text(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}
