use std::fmt::Write;

use url::Url;

use crate::domains::directory::DirectoryState;
use crate::domains::user::UserPageState;
use crate::view_models::{
    DirectoryViewModel, NoticeView, ProfileFormViewModel, ProfilePageViewModel,
    ProfileViewModel,
};

// `write!` into a `String` cannot fail.
macro_rules! emit {
    ($out:expr) => {
        $out.push('\n')
    };
    ($out:expr, $($arg:tt)*) => {
        let _ = writeln!($out, $($arg)*);
    };
}

pub fn render_directory(state: &DirectoryState, site_url: Option<&Url>) -> String {
    let mut out = String::new();
    emit!(out, "Featured Portfolios");
    emit!(out);
    match state {
        DirectoryState::Loading => {
            emit!(out, "Loading...");
        }
        DirectoryState::Failed(message) => {
            emit!(out, "Error: {message}");
        }
        DirectoryState::Loaded(profiles) => {
            let vm = DirectoryViewModel::new(profiles, site_url);
            if vm.is_empty() {
                emit!(out, "No portfolios yet.");
            }
            for card in &vm.cards {
                emit!(out, "{}", card.name);
                emit!(out, "  {}", card.headline);
                if let Some(experience) = &card.experience {
                    emit!(out, "  {experience}");
                }
                if let Some(photo) = &card.photo {
                    emit!(out, "  Photo: {photo}");
                }
                emit!(out, "  View Portfolio -> {}", card.portfolio_href);
                emit!(out);
            }
        }
    }
    out
}

pub fn render_user_page(state: &UserPageState) -> String {
    match state {
        UserPageState::Loading => "Loading...\n".to_string(),
        UserPageState::Loaded(profile) => render_profile(&ProfileViewModel::new(profile)),
        UserPageState::NotFound => "Profile not found.\n".to_string(),
        UserPageState::Failed(message) => format!("Error: {message}\n"),
    }
}

pub fn render_profile(vm: &ProfileViewModel) -> String {
    let mut out = String::new();
    emit!(out, "{}", vm.title);
    if let Some(headline) = &vm.headline {
        emit!(out, "{headline}");
    }
    if let Some(photo) = &vm.photo {
        emit!(out, "Photo: {photo}");
    }
    if !vm.details.is_empty() {
        emit!(out);
        emit!(out, "Professional Information");
        for (label, value) in &vm.details {
            emit!(out, "  {label}: {value}");
        }
    }
    if !vm.links.is_empty() {
        emit!(out);
        emit!(out, "Social Links");
        for link in &vm.links {
            emit!(out, "  {}: {}", link.label, link.href);
        }
    }
    if let Some(since) = &vm.member_since {
        emit!(out);
        emit!(out, "Member since {since}");
    }
    out
}

fn render_form(form: &ProfileFormViewModel) -> String {
    let mut out = String::new();
    for field in &form.fields {
        emit!(out, "  {}: {}", field.label, field.value);
    }
    emit!(out, "[{}]", form.submit_label);
    out
}

fn render_notice(notice: &NoticeView) -> String {
    if notice.is_error {
        format!("Error: {}\n", notice.message)
    } else {
        format!("{}\n", notice.message)
    }
}

pub fn render_profile_page(vm: &ProfilePageViewModel) -> String {
    match vm {
        ProfilePageViewModel::Loading => "Loading...\n".to_string(),
        ProfilePageViewModel::SignInRequired => {
            "Please sign in to view your profile.\n".to_string()
        }
        ProfilePageViewModel::Error { message } => format!("Error: {message}\n"),
        ProfilePageViewModel::Viewing { profile, notice } => {
            let mut out = notice.as_ref().map(render_notice).unwrap_or_default();
            out.push_str(&render_profile(profile));
            out
        }
        ProfilePageViewModel::Editing {
            profile,
            form,
            notice,
        } => {
            let mut out = notice.as_ref().map(render_notice).unwrap_or_default();
            emit!(out, "Editing {}", profile.title);
            out.push_str(&render_form(form));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexfolio_model::{UserId, UserProfile};

    #[test]
    fn directory_lists_cards_with_portfolio_links() {
        let state = DirectoryState::Loaded(vec![UserProfile {
            user_id: Some(UserId::new("u1")),
            name: "Grace".into(),
            experience: Some(42),
            ..Default::default()
        }]);
        let text = render_directory(&state, None);
        assert!(text.contains("Grace\n  Developer at Company\n  42 years experience\n"));
        assert!(text.contains("View Portfolio -> /user/u1"));
    }

    #[test]
    fn empty_directory_says_so() {
        let text = render_directory(&DirectoryState::Loaded(Vec::new()), None);
        assert!(text.contains("No portfolios yet."));
    }

    #[test]
    fn professional_information_starts_with_the_name() {
        let vm = ProfileViewModel::new(&UserProfile {
            name: "Grace".into(),
            company: Some("Navy".into()),
            ..Default::default()
        });
        let text = render_profile(&vm);
        assert!(text.contains("Professional Information
  Name: Grace
  Company: Navy
"));
    }

    #[test]
    fn not_found_user_page() {
        assert_eq!(render_user_page(&UserPageState::NotFound), "Profile not found.\n");
    }
}
