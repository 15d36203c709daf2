//! Async driver for the profile page
//!
//! Owns the [`ProfilePage`] on a single task. User intents arrive over an
//! mpsc channel, session changes over the injected subscription and effect
//! results from a `JoinSet`; every update is published as a
//! [`ProfileSnapshot`] on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use flexfolio_model::ProfileField;
use log::{debug, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use super::messages::{ProfileCommand, ProfileMessage};
use super::state::ProfileSnapshot;
use super::update::ProfilePage;
use crate::domains::auth::{SessionProvider, SessionSubscription};
use crate::infra::services::api::ProfileApi;

/// Dependencies of a mounted profile page.
#[derive(Debug, Clone)]
pub struct ProfilePageRuntime {
    api: Arc<dyn ProfileApi>,
    sessions: Arc<dyn SessionProvider>,
    notice_ttl: Duration,
}

impl ProfilePageRuntime {
    pub fn new(
        api: Arc<dyn ProfileApi>,
        sessions: Arc<dyn SessionProvider>,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            api,
            sessions,
            notice_ttl,
        }
    }

    /// Subscribe to the session and start the page driver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(self) -> ProfilePageHandle {
        let subscription = self.sessions.subscribe();
        let (intents, intent_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(ProfileSnapshot::default());

        let driver = Driver {
            page: ProfilePage::new(),
            api: self.api,
            notice_ttl: self.notice_ttl,
            effects: JoinSet::new(),
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(driver.run(subscription, intent_rx));
        debug!("[Profile] Page mounted");

        ProfilePageHandle {
            intents,
            snapshots,
            driver: Some(task),
        }
    }
}

struct Driver {
    page: ProfilePage,
    api: Arc<dyn ProfileApi>,
    notice_ttl: Duration,
    effects: JoinSet<ProfileMessage>,
    snapshots: watch::Sender<ProfileSnapshot>,
}

impl Driver {
    async fn run(
        mut self,
        mut subscription: SessionSubscription,
        mut intents: mpsc::UnboundedReceiver<ProfileMessage>,
    ) {
        let initial = subscription.current();
        self.dispatch(ProfileMessage::SessionChanged(initial));

        let mut session_open = true;
        loop {
            let message = tokio::select! {
                change = subscription.next(), if session_open => match change {
                    Some(session) => ProfileMessage::SessionChanged(session),
                    None => {
                        debug!("[Profile] Session source closed");
                        session_open = false;
                        continue;
                    }
                },
                intent = intents.recv() => match intent {
                    Some(message) => message,
                    None => break,
                },
                Some(done) = self.effects.join_next(), if !self.effects.is_empty() => {
                    match done {
                        Ok(message) => message,
                        Err(err) => {
                            warn!("[Profile] Effect task failed: {}", err);
                            continue;
                        }
                    }
                }
            };
            self.dispatch(message);
        }

        subscription.unsubscribe();
        debug!("[Profile] Driver stopped");
    }

    fn dispatch(&mut self, message: ProfileMessage) {
        for command in self.page.update(message) {
            self.spawn(command);
        }
        self.snapshots.send_replace(self.page.snapshot());
    }

    fn spawn(&mut self, command: ProfileCommand) {
        let api = Arc::clone(&self.api);
        match command {
            ProfileCommand::FetchOwnProfile { generation, token } => {
                self.effects.spawn(async move {
                    let result = api.fetch_own_profile(&token).await;
                    ProfileMessage::ProfileLoaded { generation, result }
                });
            }
            ProfileCommand::UpdateOwnProfile {
                save_id,
                token,
                profile,
            } => {
                self.effects.spawn(async move {
                    let result = api.update_own_profile(&token, &profile).await;
                    ProfileMessage::ProfileSaved { save_id, result }
                });
            }
            ProfileCommand::ExpireNotice { id } => {
                let ttl = self.notice_ttl;
                self.effects.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    ProfileMessage::NoticeExpired(id)
                });
            }
        }
    }
}

/// Handle to a mounted profile page. Dropping it unmounts the page.
#[derive(Debug)]
pub struct ProfilePageHandle {
    intents: mpsc::UnboundedSender<ProfileMessage>,
    snapshots: watch::Receiver<ProfileSnapshot>,
    driver: Option<JoinHandle<()>>,
}

impl ProfilePageHandle {
    fn send(&self, message: ProfileMessage) {
        if self.intents.send(message).is_err() {
            warn!("[Profile] Intent sent to an unmounted page");
        }
    }

    pub fn edit(&self) {
        self.send(ProfileMessage::EditRequested);
    }

    pub fn cancel(&self) {
        self.send(ProfileMessage::EditCancelled);
    }

    pub fn set_field(&self, field: ProfileField, value: impl Into<String>) {
        self.send(ProfileMessage::FieldChanged(field, value.into()));
    }

    pub fn submit(&self) {
        self.send(ProfileMessage::SubmitRequested);
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<ProfileSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the first snapshot matching `predicate`. `None` if the page
    /// stopped first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ProfileSnapshot) -> bool,
    ) -> Option<ProfileSnapshot> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots.wait_for(predicate).await.ok()?.clone();
        Some(snapshot)
    }

    /// Stop the driver and release the session subscription.
    pub async fn unmount(mut self) {
        if let Some(task) = self.driver.take() {
            task.abort();
            let _ = task.await;
            debug!("[Profile] Page unmounted");
        }
    }
}

impl Drop for ProfilePageHandle {
    fn drop(&mut self) {
        if let Some(task) = self.driver.take() {
            task.abort();
        }
    }
}
