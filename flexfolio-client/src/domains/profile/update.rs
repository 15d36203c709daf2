use log::{debug, info, warn};

use super::messages::{ProfileCommand, ProfileMessage};
use super::state::{Notice, NoticeKind, ProfilePageState, ProfileSnapshot};
use crate::domains::auth::Session;
use crate::infra::errors::ProfileError;
use flexfolio_model::{ProfileForm, UserProfile};

pub const SAVE_SUCCESS_MESSAGE: &str = "Profile updated successfully!";

/// Profile page controller
///
/// A pure state machine: `update` never performs I/O, it returns the commands
/// the runtime has to execute. Results come back as messages tagged with the
/// generation or save id they were issued for so late completions can be
/// recognized and dropped.
#[derive(Debug, Default)]
pub struct ProfilePage {
    state: ProfilePageState,
    notice: Option<Notice>,
    session: Option<Session>,
    /// Bumped on every session notification and every successful save.
    generation: u64,
    next_save_id: u64,
    next_notice_id: u64,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ProfilePageState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            state: self.state.clone(),
            notice: self.notice.clone(),
        }
    }

    pub fn update(&mut self, message: ProfileMessage) -> Vec<ProfileCommand> {
        match message {
            ProfileMessage::SessionChanged(session) => {
                self.handle_session_changed(session)
            }
            ProfileMessage::ProfileLoaded { generation, result } => {
                self.handle_profile_loaded(generation, result)
            }
            ProfileMessage::EditRequested => {
                if let ProfilePageState::Viewing { profile } = &self.state {
                    let form = ProfileForm::from_profile(profile);
                    self.state = ProfilePageState::Editing {
                        profile: profile.clone(),
                        form,
                        pending_save: None,
                    };
                }
                Vec::new()
            }
            ProfileMessage::EditCancelled => {
                if let ProfilePageState::Editing {
                    profile,
                    pending_save: None,
                    ..
                } = &self.state
                {
                    self.state = ProfilePageState::Viewing {
                        profile: profile.clone(),
                    };
                }
                Vec::new()
            }
            ProfileMessage::FieldChanged(field, value) => {
                if let ProfilePageState::Editing { form, .. } = &mut self.state {
                    form.set(field, value);
                }
                Vec::new()
            }
            ProfileMessage::SubmitRequested => self.handle_submit(),
            ProfileMessage::ProfileSaved { save_id, result } => {
                self.handle_profile_saved(save_id, result)
            }
            ProfileMessage::NoticeExpired(id) => {
                if self.notice.as_ref().is_some_and(|n| n.id == id) {
                    self.notice = None;
                }
                Vec::new()
            }
        }
    }

    fn handle_session_changed(
        &mut self,
        session: Option<Session>,
    ) -> Vec<ProfileCommand> {
        self.generation += 1;
        let previous = self.session.take();
        self.session = session.filter(|s| !s.access_token.is_empty());

        let Some(session) = &self.session else {
            info!("[Profile] No session, showing sign-in prompt");
            self.state = ProfilePageState::Unauthenticated;
            return Vec::new();
        };

        // An open form survives a refresh for the same user only.
        let same_user = previous.as_ref().is_some_and(|p| p.same_user(session));
        let editing = matches!(self.state, ProfilePageState::Editing { .. });
        if editing && !same_user {
            info!("[Profile] Session switched users, discarding the open form");
        }
        if !(editing && same_user) {
            self.state = ProfilePageState::Loading;
        }
        debug!("[Profile] Fetching own profile (generation {})", self.generation);
        vec![ProfileCommand::FetchOwnProfile {
            generation: self.generation,
            token: session.access_token.clone(),
        }]
    }

    fn handle_profile_loaded(
        &mut self,
        generation: u64,
        result: Result<UserProfile, ProfileError>,
    ) -> Vec<ProfileCommand> {
        if generation != self.generation {
            debug!(
                "[Profile] Dropping stale fetch (generation {}, current {})",
                generation, self.generation
            );
            return Vec::new();
        }

        if let ProfilePageState::Editing { profile, .. } = &mut self.state {
            return match result {
                Ok(fresh) => {
                    *profile = fresh;
                    Vec::new()
                }
                Err(err) => {
                    warn!("[Profile] Refresh failed while editing: {}", err);
                    self.show_notice(NoticeKind::Error, err.to_string())
                }
            };
        }

        match result {
            Ok(profile) => {
                self.state = ProfilePageState::Viewing { profile };
                Vec::new()
            }
            Err(err) => {
                warn!("[Profile] Failed to load profile: {}", err);
                self.state = ProfilePageState::Error {
                    message: err.to_string(),
                };
                Vec::new()
            }
        }
    }

    fn handle_submit(&mut self) -> Vec<ProfileCommand> {
        let ProfilePageState::Editing {
            form, pending_save, ..
        } = &mut self.state
        else {
            return Vec::new();
        };
        if pending_save.is_some() {
            debug!("[Profile] Save already in flight, ignoring submit");
            return Vec::new();
        }

        let candidate = match form.to_profile() {
            Ok(candidate) => candidate,
            Err(err) => {
                return self.show_notice(NoticeKind::Error, err.to_string());
            }
        };
        let Some(session) = &self.session else {
            return self
                .show_notice(NoticeKind::Error, ProfileError::NoSession.to_string());
        };

        self.next_save_id += 1;
        let save_id = self.next_save_id;
        *pending_save = Some(save_id);
        info!("[Profile] Saving profile (save {})", save_id);
        vec![ProfileCommand::UpdateOwnProfile {
            save_id,
            token: session.access_token.clone(),
            profile: candidate,
        }]
    }

    fn handle_profile_saved(
        &mut self,
        save_id: u64,
        result: Result<UserProfile, ProfileError>,
    ) -> Vec<ProfileCommand> {
        let ProfilePageState::Editing { pending_save, .. } = &mut self.state
        else {
            debug!("[Profile] Save {} finished after leaving the form", save_id);
            return Vec::new();
        };
        if *pending_save != Some(save_id) {
            debug!("[Profile] Ignoring result of superseded save {}", save_id);
            return Vec::new();
        }

        match result {
            Ok(stored) => {
                // Fetches issued before the save would overwrite the new record.
                self.generation += 1;
                self.state = ProfilePageState::Viewing { profile: stored };
                self.show_notice(NoticeKind::Success, SAVE_SUCCESS_MESSAGE)
            }
            Err(err) => {
                warn!("[Profile] Save {} failed: {}", save_id, err);
                *pending_save = None;
                self.show_notice(NoticeKind::Error, err.to_string())
            }
        }
    }

    fn show_notice(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
    ) -> Vec<ProfileCommand> {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notice = Some(Notice {
            id,
            kind,
            message: message.into(),
        });
        vec![ProfileCommand::ExpireNotice { id }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::AccessToken;
    use crate::infra::errors::FailureReason;
    use flexfolio_model::{ProfileField, UserProfile};
    use reqwest::StatusCode;

    fn session(token: &str) -> Session {
        Session::new(AccessToken::new(token))
    }

    fn ada() -> UserProfile {
        UserProfile {
            name: "Ada Lovelace".into(),
            company: Some("Analytical Engines".into()),
            role: Some("Engineer".into()),
            experience: Some(12),
            ..Default::default()
        }
    }

    fn fetch_generation(commands: &[ProfileCommand]) -> u64 {
        match commands {
            [ProfileCommand::FetchOwnProfile { generation, .. }] => *generation,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn viewing(profile: UserProfile) -> ProfilePage {
        let mut page = ProfilePage::new();
        let generation =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("t")))));
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Ok(profile),
        });
        page
    }

    fn editing() -> ProfilePage {
        let mut page = viewing(ada());
        page.update(ProfileMessage::EditRequested);
        page
    }

    fn submit(page: &mut ProfilePage) -> u64 {
        match page.update(ProfileMessage::SubmitRequested).as_slice() {
            [ProfileCommand::UpdateOwnProfile { save_id, .. }] => *save_id,
            other => panic!("expected an update, got {other:?}"),
        }
    }

    fn unauthorized() -> ProfileError {
        ProfileError::UpdateFailure {
            reason: FailureReason::Status(StatusCode::UNAUTHORIZED),
        }
    }

    #[test]
    fn starts_loading_and_fetches_with_session_token() {
        let mut page = ProfilePage::new();
        assert_eq!(page.state(), &ProfilePageState::Loading);

        let commands = page.update(ProfileMessage::SessionChanged(Some(session("abc"))));
        assert_eq!(
            commands,
            vec![ProfileCommand::FetchOwnProfile {
                generation: 1,
                token: AccessToken::new("abc"),
            }]
        );
        assert_eq!(page.state(), &ProfilePageState::Loading);
    }

    #[test]
    fn absent_session_is_unauthenticated_without_fetching() {
        let mut page = ProfilePage::new();
        assert!(page.update(ProfileMessage::SessionChanged(None)).is_empty());
        assert_eq!(page.state(), &ProfilePageState::Unauthenticated);

        let mut page = ProfilePage::new();
        assert!(
            page.update(ProfileMessage::SessionChanged(Some(session(""))))
                .is_empty()
        );
        assert_eq!(page.state(), &ProfilePageState::Unauthenticated);
    }

    #[test]
    fn last_session_notification_wins() {
        let mut page = ProfilePage::new();
        let first =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("a")))));
        let second =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("b")))));
        assert!(second > first);

        let bob = UserProfile {
            name: "Bob".into(),
            ..ada()
        };
        page.update(ProfileMessage::ProfileLoaded {
            generation: second,
            result: Ok(bob.clone()),
        });
        page.update(ProfileMessage::ProfileLoaded {
            generation: first,
            result: Ok(ada()),
        });
        assert_eq!(page.state(), &ProfilePageState::Viewing { profile: bob });
    }

    #[test]
    fn stale_failure_does_not_clobber_unauthenticated() {
        let mut page = ProfilePage::new();
        let generation =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("a")))));
        page.update(ProfileMessage::SessionChanged(None));
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Err(ProfileError::FetchFailure {
                reason: FailureReason::Timeout,
            }),
        });
        assert_eq!(page.state(), &ProfilePageState::Unauthenticated);
    }

    #[test]
    fn fetch_failure_shows_error_message() {
        let mut page = ProfilePage::new();
        let generation =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("a")))));
        let err = ProfileError::FetchFailure {
            reason: FailureReason::SchemaMismatch("experience".into()),
        };
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Err(err.clone()),
        });
        assert_eq!(
            page.state(),
            &ProfilePageState::Error {
                message: err.to_string()
            }
        );
    }

    #[test]
    fn edit_prefills_and_cancel_restores() {
        let mut page = editing();
        match page.state() {
            ProfilePageState::Editing { form, .. } => {
                assert_eq!(form.get(ProfileField::Name), "Ada Lovelace");
                assert_eq!(form.get(ProfileField::Experience), "12");
            }
            other => panic!("expected editing, got {other:?}"),
        }

        page.update(ProfileMessage::FieldChanged(ProfileField::Name, "Changed".into()));
        page.update(ProfileMessage::EditCancelled);
        assert_eq!(page.state(), &ProfilePageState::Viewing { profile: ada() });
    }

    #[test]
    fn edit_is_ignored_outside_viewing() {
        let mut page = ProfilePage::new();
        page.update(ProfileMessage::EditRequested);
        assert_eq!(page.state(), &ProfilePageState::Loading);
    }

    #[test]
    fn successful_save_replaces_record_and_notifies() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Website, "ada.dev".into()));
        let commands = page.update(ProfileMessage::SubmitRequested);
        let (save_id, sent) = match commands.as_slice() {
            [ProfileCommand::UpdateOwnProfile {
                save_id, profile, ..
            }] => (*save_id, profile.clone()),
            other => panic!("expected an update, got {other:?}"),
        };
        assert_eq!(sent.url_link.as_deref(), Some("https://ada.dev"));
        assert_eq!(sent.github_id, None);
        assert!(page.state().is_saving());

        let stored = UserProfile {
            created_at: Some("2024-01-01T00:00:00Z".into()),
            ..sent
        };
        let commands = page.update(ProfileMessage::ProfileSaved {
            save_id,
            result: Ok(stored.clone()),
        });
        assert_eq!(page.state(), &ProfilePageState::Viewing { profile: stored });
        let notice = page.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, SAVE_SUCCESS_MESSAGE);
        assert_eq!(commands, vec![ProfileCommand::ExpireNotice { id: notice.id }]);
    }

    #[test]
    fn failed_save_keeps_form_and_reports() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Role, "Lead".into()));
        let save_id = submit(&mut page);
        page.update(ProfileMessage::ProfileSaved {
            save_id,
            result: Err(unauthorized()),
        });

        match page.state() {
            ProfilePageState::Editing {
                form, pending_save, ..
            } => {
                assert_eq!(form.get(ProfileField::Role), "Lead");
                assert_eq!(*pending_save, None);
            }
            other => panic!("expected editing, got {other:?}"),
        }
        let notice = page.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, unauthorized().to_string());
    }

    #[test]
    fn invalid_form_never_reaches_the_network() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Experience, "lots".into()));
        let commands = page.update(ProfileMessage::SubmitRequested);
        assert!(matches!(
            commands.as_slice(),
            [ProfileCommand::ExpireNotice { .. }]
        ));
        assert!(!page.state().is_saving());
        assert!(page.notice().unwrap().message.contains("experience"));
    }

    #[test]
    fn duplicate_submit_is_ignored_while_saving() {
        let mut page = editing();
        submit(&mut page);
        assert!(page.update(ProfileMessage::SubmitRequested).is_empty());
        page.update(ProfileMessage::EditCancelled);
        assert!(page.state().is_saving());
    }

    #[test]
    fn save_completion_after_sign_out_is_dropped() {
        let mut page = editing();
        let save_id = submit(&mut page);
        page.update(ProfileMessage::SessionChanged(None));
        page.update(ProfileMessage::ProfileSaved {
            save_id,
            result: Ok(ada()),
        });
        assert_eq!(page.state(), &ProfilePageState::Unauthenticated);
        assert!(page.notice().is_none());
    }

    #[test]
    fn fetch_issued_before_save_cannot_overwrite_it() {
        let mut page = editing();
        let refresh =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("t")))));
        let save_id = submit(&mut page);
        let stored = UserProfile {
            name: "Ada King".into(),
            ..ada()
        };
        page.update(ProfileMessage::ProfileSaved {
            save_id,
            result: Ok(stored.clone()),
        });
        page.update(ProfileMessage::ProfileLoaded {
            generation: refresh,
            result: Ok(ada()),
        });
        assert_eq!(page.state(), &ProfilePageState::Viewing { profile: stored });
    }

    #[test]
    fn refresh_while_editing_keeps_the_form() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Company, "Draft".into()));
        let generation =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("t")))));
        let fresh = UserProfile {
            company: Some("Babbage & Co".into()),
            ..ada()
        };
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Ok(fresh.clone()),
        });
        match page.state() {
            ProfilePageState::Editing { profile, form, .. } => {
                assert_eq!(profile, &fresh);
                assert_eq!(form.get(ProfileField::Company), "Draft");
            }
            other => panic!("expected editing, got {other:?}"),
        }
    }

    #[test]
    fn user_switch_while_editing_discards_the_draft() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Role, "Ada draft".into()));

        let generation =
            fetch_generation(&page.update(ProfileMessage::SessionChanged(Some(session("bob")))));
        assert_eq!(page.state(), &ProfilePageState::Loading);

        let bob = UserProfile {
            name: "Bob".into(),
            ..ada()
        };
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Ok(bob.clone()),
        });
        assert_eq!(page.state(), &ProfilePageState::Viewing { profile: bob });
        assert!(page.update(ProfileMessage::SubmitRequested).is_empty());
    }

    #[test]
    fn token_refresh_for_the_same_user_keeps_the_form() {
        let mut page = ProfilePage::new();
        let generation = fetch_generation(&page.update(ProfileMessage::SessionChanged(
            Some(session("t1").with_user_id("u-ada")),
        )));
        page.update(ProfileMessage::ProfileLoaded {
            generation,
            result: Ok(ada()),
        });
        page.update(ProfileMessage::EditRequested);
        page.update(ProfileMessage::FieldChanged(ProfileField::Role, "Countess".into()));

        page.update(ProfileMessage::SessionChanged(Some(
            session("t2").with_user_id("u-ada"),
        )));
        match page.update(ProfileMessage::SubmitRequested).as_slice() {
            [ProfileCommand::UpdateOwnProfile { token, profile, .. }] => {
                assert_eq!(token, &AccessToken::new("t2"));
                assert_eq!(profile.role.as_deref(), Some("Countess"));
            }
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn only_the_current_notice_expires() {
        let mut page = editing();
        page.update(ProfileMessage::FieldChanged(ProfileField::Name, "".into()));
        page.update(ProfileMessage::SubmitRequested);
        let first = page.notice().unwrap().id;
        page.update(ProfileMessage::SubmitRequested);
        let second = page.notice().unwrap().id;
        assert_ne!(first, second);

        page.update(ProfileMessage::NoticeExpired(first));
        assert_eq!(page.notice().map(|n| n.id), Some(second));
        page.update(ProfileMessage::NoticeExpired(second));
        assert!(page.notice().is_none());
    }
}
