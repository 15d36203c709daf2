//! Single public profile page, looked up by user id.

use flexfolio_model::{UserId, UserProfile};
use log::warn;

use crate::infra::errors::ProfileError;
use crate::infra::services::api::ProfileApi;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserPageState {
    #[default]
    Loading,
    Loaded(UserProfile),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum UserPageMessage {
    Loaded(Result<UserProfile, ProfileError>),
}

impl UserPageState {
    pub fn update(&mut self, message: UserPageMessage) {
        if !matches!(self, UserPageState::Loading) {
            return;
        }
        *self = match message {
            UserPageMessage::Loaded(Ok(profile)) => UserPageState::Loaded(profile),
            UserPageMessage::Loaded(Err(err)) if err.is_not_found() => {
                UserPageState::NotFound
            }
            UserPageMessage::Loaded(Err(err)) => {
                warn!("[User] Failed to load profile: {}", err);
                UserPageState::Failed(err.to_string())
            }
        };
    }
}

pub async fn load(api: &dyn ProfileApi, id: &UserId) -> UserPageState {
    let mut state = UserPageState::Loading;
    state.update(UserPageMessage::Loaded(api.fetch_profile_by_id(id).await));
    state
}
