//! Public directory page: every listed profile, read-only.

use flexfolio_model::UserProfile;
use log::{info, warn};

use crate::infra::errors::ProfileError;
use crate::infra::services::api::ProfileApi;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Loaded(Vec<UserProfile>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum DirectoryMessage {
    Loaded(Result<Vec<UserProfile>, ProfileError>),
}

impl DirectoryState {
    /// Settle the page. Only the first result is applied.
    pub fn update(&mut self, message: DirectoryMessage) {
        if !matches!(self, DirectoryState::Loading) {
            return;
        }
        match message {
            DirectoryMessage::Loaded(Ok(profiles)) => {
                info!("[Directory] Loaded {} profiles", profiles.len());
                *self = DirectoryState::Loaded(profiles);
            }
            DirectoryMessage::Loaded(Err(err)) => {
                warn!("[Directory] Failed to load profiles: {}", err);
                *self = DirectoryState::Failed(err.to_string());
            }
        }
    }

    pub fn profiles(&self) -> &[UserProfile] {
        match self {
            DirectoryState::Loaded(profiles) => profiles,
            _ => &[],
        }
    }
}

/// Fetch the listing once and return the settled page.
pub async fn load(api: &dyn ProfileApi) -> DirectoryState {
    let mut state = DirectoryState::Loading;
    state.update(DirectoryMessage::Loaded(api.fetch_profiles().await));
    state
}
