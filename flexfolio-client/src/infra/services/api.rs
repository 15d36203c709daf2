//! API service trait and implementations
//!
//! Pages depend on `ProfileApi` rather than `ApiClient` so they can be driven
//! by stubs in tests.

use std::fmt::Debug;

use async_trait::async_trait;
use flexfolio_model::{UserId, UserProfile};

use crate::domains::auth::AccessToken;
use crate::infra::api_client::ApiClient;
use crate::infra::errors::ProfileError;

/// Profile service operations
#[async_trait]
pub trait ProfileApi: Send + Sync + Debug {
    /// Fetch the profile belonging to the holder of `token`.
    async fn fetch_own_profile(
        &self,
        token: &AccessToken,
    ) -> Result<UserProfile, ProfileError>;

    /// Replace the token holder's profile, returning the stored record.
    async fn update_own_profile(
        &self,
        token: &AccessToken,
        profile: &UserProfile,
    ) -> Result<UserProfile, ProfileError>;

    async fn fetch_profile_by_id(
        &self,
        id: &UserId,
    ) -> Result<UserProfile, ProfileError>;

    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>, ProfileError>;
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn fetch_own_profile(
        &self,
        token: &AccessToken,
    ) -> Result<UserProfile, ProfileError> {
        ApiClient::fetch_own_profile(self, token).await
    }

    async fn update_own_profile(
        &self,
        token: &AccessToken,
        profile: &UserProfile,
    ) -> Result<UserProfile, ProfileError> {
        ApiClient::update_own_profile(self, token, profile).await
    }

    async fn fetch_profile_by_id(
        &self,
        id: &UserId,
    ) -> Result<UserProfile, ProfileError> {
        ApiClient::fetch_profile_by_id(self, id).await
    }

    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>, ProfileError> {
        ApiClient::fetch_profiles(self).await
    }
}
