use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flexfolio_model::{UserId, UserProfile};
use tokio::sync::oneshot;

use crate::domains::auth::AccessToken;
use crate::infra::errors::{FailureReason, ProfileError};
use crate::infra::services::api::ProfileApi;

/// A call observed by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubCall {
    FetchOwn { token: String },
    Update { token: String, profile: UserProfile },
    FetchById(UserId),
    FetchAll,
}

type Reply = oneshot::Sender<Result<UserProfile, ProfileError>>;

#[derive(Debug)]
struct PendingCall {
    call: StubCall,
    reply: Reply,
}

#[derive(Debug, Default)]
struct InnerState {
    own: HashMap<String, UserProfile>,
    listing: Vec<UserProfile>,
    fetch_error: Option<ProfileError>,
    update_error: Option<ProfileError>,
    /// When set, own-profile reads and writes park until resolved by the test.
    hold: bool,
    pending: Vec<PendingCall>,
    calls: Vec<StubCall>,
}

/// In-memory `ProfileApi` with optional manual completion of calls.
#[derive(Debug, Clone, Default)]
pub struct StubProfileApi {
    inner: Arc<Mutex<InnerState>>,
}

fn stub_failure(detail: &str) -> FailureReason {
    FailureReason::Transport(detail.to_string())
}

impl StubProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InnerState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_own_profile(self, token: &str, profile: UserProfile) -> Self {
        self.lock().own.insert(token.to_string(), profile);
        self
    }

    pub fn with_listing(self, listing: Vec<UserProfile>) -> Self {
        self.lock().listing = listing;
        self
    }

    pub fn held(self) -> Self {
        self.lock().hold = true;
        self
    }

    pub fn fail_fetches(&self, err: ProfileError) {
        self.lock().fetch_error = Some(err);
    }

    pub fn fail_updates(&self, err: ProfileError) {
        self.lock().update_error = Some(err);
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.lock().calls.clone()
    }

    pub fn pending_calls(&self) -> Vec<StubCall> {
        self.lock().pending.iter().map(|p| p.call.clone()).collect()
    }

    /// Wait until at least `count` calls are parked.
    pub async fn wait_for_pending(&self, count: usize) {
        for _ in 0..500 {
            if self.lock().pending.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("timed out waiting for {count} pending calls");
    }

    /// Complete the parked call at `index` (in arrival order).
    pub fn resolve(&self, index: usize, result: Result<UserProfile, ProfileError>) {
        let pending = self.lock().pending.remove(index);
        let _ = pending.reply.send(result);
    }

    async fn respond(
        &self,
        call: StubCall,
        immediate: impl FnOnce(&mut InnerState) -> Result<UserProfile, ProfileError>,
    ) -> Result<UserProfile, ProfileError> {
        let rx = {
            let mut inner = self.lock();
            inner.calls.push(call.clone());
            if !inner.hold {
                return immediate(&mut *inner);
            }
            let (reply, rx) = oneshot::channel();
            inner.pending.push(PendingCall { call, reply });
            rx
        };
        rx.await.unwrap_or_else(|_| {
            Err(ProfileError::FetchFailure {
                reason: stub_failure("stub call dropped"),
            })
        })
    }
}

#[async_trait]
impl ProfileApi for StubProfileApi {
    async fn fetch_own_profile(
        &self,
        token: &AccessToken,
    ) -> Result<UserProfile, ProfileError> {
        if token.is_empty() {
            return Err(ProfileError::NoSession);
        }
        let key = token.expose().to_string();
        let call = StubCall::FetchOwn { token: key.clone() };
        self.respond(call, |inner| {
            if let Some(err) = inner.fetch_error.clone() {
                return Err(err);
            }
            inner.own.get(&key).cloned().ok_or(ProfileError::FetchFailure {
                reason: FailureReason::Status(reqwest::StatusCode::NOT_FOUND),
            })
        })
        .await
    }

    async fn update_own_profile(
        &self,
        token: &AccessToken,
        profile: &UserProfile,
    ) -> Result<UserProfile, ProfileError> {
        if token.is_empty() {
            return Err(ProfileError::NoSession);
        }
        let key = token.expose().to_string();
        let call = StubCall::Update {
            token: key.clone(),
            profile: profile.clone(),
        };
        let stored = profile.clone();
        self.respond(call, move |inner| {
            if let Some(err) = inner.update_error.clone() {
                return Err(err);
            }
            inner.own.insert(key, stored.clone());
            Ok(stored)
        })
        .await
    }

    async fn fetch_profile_by_id(
        &self,
        id: &UserId,
    ) -> Result<UserProfile, ProfileError> {
        let mut inner = self.lock();
        inner.calls.push(StubCall::FetchById(id.clone()));
        if let Some(err) = inner.fetch_error.clone() {
            return Err(err);
        }
        inner
            .listing
            .iter()
            .find(|p| p.user_id.as_ref() == Some(id))
            .cloned()
            .ok_or(ProfileError::FetchFailure {
                reason: FailureReason::Status(reqwest::StatusCode::NOT_FOUND),
            })
    }

    async fn fetch_profiles(&self) -> Result<Vec<UserProfile>, ProfileError> {
        let mut inner = self.lock();
        inner.calls.push(StubCall::FetchAll);
        if let Some(err) = inner.fetch_error.clone() {
            return Err(err);
        }
        Ok(inner.listing.clone())
    }
}
