use flexfolio_model::{ProfileForm, UserProfile};

/// What the profile page is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfilePageState {
    #[default]
    Loading,
    Unauthenticated,
    Viewing {
        profile: UserProfile,
    },
    Editing {
        /// Last record received from the server.
        profile: UserProfile,
        form: ProfileForm,
        /// Id of the in-flight save, if any.
        pending_save: Option<u64>,
    },
    Error {
        message: String,
    },
}

impl ProfilePageState {
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ProfilePageState::Viewing { profile }
            | ProfilePageState::Editing { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(
            self,
            ProfilePageState::Editing {
                pending_save: Some(_),
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above the page until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Published view of the page after every update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSnapshot {
    pub state: ProfilePageState,
    pub notice: Option<Notice>,
}
