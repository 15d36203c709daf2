use flexfolio_model::{ProfileField, UserProfile};

use crate::domains::auth::{AccessToken, Session};
use crate::infra::errors::ProfileError;

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    /// Session notification, including the value present at mount.
    SessionChanged(Option<Session>),
    ProfileLoaded {
        generation: u64,
        result: Result<UserProfile, ProfileError>,
    },

    // User intents
    EditRequested,
    EditCancelled,
    FieldChanged(ProfileField, String),
    SubmitRequested,

    ProfileSaved {
        save_id: u64,
        result: Result<UserProfile, ProfileError>,
    },
    NoticeExpired(u64),
}

/// Side effect requested by [`super::ProfilePage::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCommand {
    FetchOwnProfile {
        generation: u64,
        token: AccessToken,
    },
    UpdateOwnProfile {
        save_id: u64,
        token: AccessToken,
        profile: UserProfile,
    },
    /// Send `NoticeExpired(id)` after the notice lifetime.
    ExpireNotice { id: u64 },
}
