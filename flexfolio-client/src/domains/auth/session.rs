use std::sync::Arc;

use flexfolio_model::UserId;
use log::debug;
use tokio::sync::watch;

use super::token::AccessToken;

/// An authenticated session as seen by the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: AccessToken,
    /// Known when the host resolved the user; pages do not require it.
    pub user_id: Option<UserId>,
}

impl Session {
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            access_token,
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Whether both sessions belong to the same user.
    ///
    /// User ids decide when both are known. Otherwise only an identical token
    /// counts, so a refreshed token has to carry the user id to be recognized.
    pub fn same_user(&self, other: &Session) -> bool {
        match (&self.user_id, &other.user_id) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => self.access_token == other.access_token,
        }
    }
}

/// Capability handed to session-bound pages.
pub trait SessionProvider: Send + Sync + std::fmt::Debug {
    fn current(&self) -> Option<Session>;

    /// Start observing session changes. The subscription stays registered
    /// until it is dropped or [`SessionSubscription::unsubscribe`] is called.
    fn subscribe(&self) -> SessionSubscription;
}

/// Live view of the session, released on drop.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<Session>>,
}

impl SessionSubscription {
    pub fn new(receiver: watch::Receiver<Option<Session>>) -> Self {
        Self { receiver }
    }

    /// Current value; marks it as observed so [`Self::next`] only reports
    /// later changes.
    pub fn current(&mut self) -> Option<Session> {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next change. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Option<Session>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {
        debug!("[Session] Subscription released");
    }
}

/// Thread-safe session store using a watch channel
#[derive(Clone, Debug)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Option<Session>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.sign_in(session);
        store
    }

    pub fn sign_in(&self, session: Session) {
        debug!("[Session] Signed in");
        self.sender.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        debug!("[Session] Signed out");
        self.sender.send_replace(None);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl SessionProvider for SessionStore {
    fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.sender.subscribe())
    }
}
