use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use flexfolio_model::{UserId, UserProfile};
use log::info;

use super::bootstrap::AppContext;
use super::cli::{Cli, Command, ProfileAction, ProfileEdits};
use crate::domains::auth::{AccessToken, Session, SessionStore};
use crate::domains::directory::{self, DirectoryState};
use crate::domains::profile::{
    NoticeKind, ProfilePageHandle, ProfilePageRuntime, ProfilePageState,
    ProfileSnapshot,
};
use crate::domains::user::{self, UserPageState};
use crate::view_models::ProfilePageViewModel;
use crate::views::text;

/// Slack on top of the request timeout before a page counts as stuck.
const SETTLE_GRACE: Duration = Duration::from_secs(5);

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::load(cli.config.clone())?;
    match &cli.command {
        Command::Directory => show_directory(&ctx, cli.json).await,
        Command::User { id } => show_user(&ctx, &UserId::new(id.as_str()), cli.json).await,
        Command::Profile { action } => {
            let sessions = session_store(cli.token.as_deref());
            match action {
                ProfileAction::Show => show_profile(&ctx, sessions, cli.json).await,
                ProfileAction::Edit(edits) => {
                    edit_profile(&ctx, sessions, edits, cli.json).await
                }
            }
        }
    }
}

fn session_store(token: Option<&str>) -> SessionStore {
    match token.map(AccessToken::new).filter(|t| !t.is_empty()) {
        Some(token) => SessionStore::with_session(Session::new(token)),
        None => SessionStore::new(),
    }
}

fn print_records(records: &[UserProfile]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("failed to encode JSON")?;
    println!("{json}");
    Ok(())
}

fn print_record(record: &UserProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to encode JSON")?;
    println!("{json}");
    Ok(())
}

async fn show_directory(ctx: &AppContext, json: bool) -> Result<()> {
    let state = directory::load(ctx.api.as_ref()).await;
    match (&state, json) {
        (DirectoryState::Loaded(profiles), true) => print_records(profiles)?,
        _ => print!(
            "{}",
            text::render_directory(&state, ctx.config.ui.site_url.as_ref())
        ),
    }
    if let DirectoryState::Failed(message) = state {
        bail!(message);
    }
    Ok(())
}

async fn show_user(ctx: &AppContext, id: &UserId, json: bool) -> Result<()> {
    let state = user::load(ctx.api.as_ref(), id).await;
    match (&state, json) {
        (UserPageState::Loaded(profile), true) => print_record(profile)?,
        _ => print!("{}", text::render_user_page(&state)),
    }
    match state {
        UserPageState::NotFound => bail!("no profile with id {id}"),
        UserPageState::Failed(message) => bail!(message),
        _ => Ok(()),
    }
}

fn mount(ctx: &AppContext, sessions: SessionStore) -> ProfilePageHandle {
    ProfilePageRuntime::new(
        ctx.api.clone(),
        Arc::new(sessions),
        ctx.config.ui.notice_ttl,
    )
    .mount()
}

async fn settle(
    ctx: &AppContext,
    page: &ProfilePageHandle,
    predicate: impl FnMut(&ProfileSnapshot) -> bool,
) -> Result<ProfileSnapshot> {
    let budget = ctx.config.api.timeout + SETTLE_GRACE;
    tokio::time::timeout(budget, page.wait_for(predicate))
        .await
        .context("profile page did not settle")?
        .context("profile page stopped unexpectedly")
}

fn loaded(snapshot: &ProfileSnapshot) -> bool {
    !matches!(snapshot.state, ProfilePageState::Loading)
}

fn render(snapshot: &ProfileSnapshot, json: bool) -> Result<()> {
    match (&snapshot.state, json) {
        (ProfilePageState::Viewing { profile }, true) => print_record(profile),
        _ => {
            print!(
                "{}",
                text::render_profile_page(&ProfilePageViewModel::new(snapshot))
            );
            Ok(())
        }
    }
}

fn bail_on_unsettled(snapshot: &ProfileSnapshot) -> Result<()> {
    match &snapshot.state {
        ProfilePageState::Unauthenticated => {
            bail!("not signed in: pass --token or set FLEXFOLIO_ACCESS_TOKEN")
        }
        ProfilePageState::Error { message } => bail!(message.clone()),
        _ => Ok(()),
    }
}

async fn show_profile(ctx: &AppContext, sessions: SessionStore, json: bool) -> Result<()> {
    let page = mount(ctx, sessions);
    let snapshot = settle(ctx, &page, loaded).await?;
    page.unmount().await;

    render(&snapshot, json)?;
    bail_on_unsettled(&snapshot)
}

async fn edit_profile(
    ctx: &AppContext,
    sessions: SessionStore,
    edits: &ProfileEdits,
    json: bool,
) -> Result<()> {
    let page = mount(ctx, sessions);
    let snapshot = settle(ctx, &page, loaded).await?;
    if !matches!(snapshot.state, ProfilePageState::Viewing { .. }) {
        page.unmount().await;
        render(&snapshot, json)?;
        return bail_on_unsettled(&snapshot);
    }

    page.edit();
    for (field, value) in edits.changes() {
        page.set_field(field, value);
    }
    page.submit();
    info!("[Profile] Submitted {} change(s)", edits.changes().len());

    let snapshot = settle(ctx, &page, |s| s.notice.is_some()).await?;
    page.unmount().await;

    render(&snapshot, json)?;
    match &snapshot.notice {
        Some(notice) if notice.kind == NoticeKind::Error => bail!(notice.message.clone()),
        _ => Ok(()),
    }
}
